use axum::{
    extract::{Path, State},
    Extension, Json,
};
use dropoff_core::ShopConfig;
use dropoff_pricing::{
    quote_order, Coordinate, DeliveryConfiguration, OrderCharges, Quote, QuoteRequest,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pricing_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ShopItem {
    id: String,
    name: String,
    location: Coordinate,
    has_custom_delivery: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuoteBody {
    pub subtotal: Decimal,
    pub consumer: Coordinate,
}

#[derive(Debug, Serialize)]
pub(super) struct QuoteData {
    shop_id: String,
    #[serde(flatten)]
    quote: Quote,
    #[serde(skip_serializing_if = "Option::is_none")]
    charges: Option<OrderCharges>,
}

fn find_shop<'a>(
    state: &'a AppState,
    req_id: &str,
    shop_id: &str,
) -> Result<&'a ShopConfig, ApiError> {
    state.shops.find(shop_id).ok_or_else(|| {
        ApiError::new(
            req_id.to_string(),
            "not_found",
            format!("shop '{shop_id}' not found"),
        )
    })
}

pub(super) async fn list_shops(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ShopItem>>> {
    let data = state
        .shops
        .shops
        .iter()
        .map(|shop| ShopItem {
            id: shop.id.clone(),
            name: shop.name.clone(),
            location: shop.location,
            has_custom_delivery: shop.delivery.is_some(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_delivery_config(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(shop_id): Path<String>,
) -> Result<Json<ApiResponse<DeliveryConfiguration>>, ApiError> {
    let shop = find_shop(&state, &req_id.0, &shop_id)?;

    Ok(Json(ApiResponse {
        data: shop.effective_delivery(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Prices an order for the order-placement flow.
pub(super) async fn quote_for_shop(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(shop_id): Path<String>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<ApiResponse<QuoteData>>, ApiError> {
    let shop = find_shop(&state, &req_id.0, &shop_id)?;
    let config = shop.effective_delivery();

    let request = QuoteRequest {
        subtotal: body.subtotal,
        consumer: body.consumer,
        shop: shop.location,
    };
    let quote =
        quote_order(&request, &config).map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    let charges = quote
        .breakdown()
        .map(|breakdown| OrderCharges::from_breakdown(body.subtotal, breakdown))
        .transpose()
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    tracing::info!(
        shop = %shop_id,
        subtotal = %body.subtotal,
        eligible = charges.is_some(),
        total_cents = charges.map(|c| c.total_cents),
        "quoted order"
    );

    Ok(Json(ApiResponse {
        data: QuoteData {
            shop_id,
            quote,
            charges,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
