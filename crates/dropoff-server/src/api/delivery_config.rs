//! Settings-screen endpoints: validate a draft configuration and preview the
//! fee it would charge, before the merchant saves it.

use axum::{Extension, Json};
use dropoff_pricing::{
    check_minimum_order, compute_total_fee, ConfigWarning, DeliveryConfiguration,
    EligibilityOutcome, OrderCalculationResult,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_pricing_error, ApiError, ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct WarningItem {
    #[serde(flatten)]
    warning: ConfigWarning,
    message: String,
}

impl From<ConfigWarning> for WarningItem {
    fn from(warning: ConfigWarning) -> Self {
        let message = warning.to_string();
        Self { warning, message }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ValidationData {
    valid: bool,
    warnings: Vec<WarningItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PreviewBody {
    #[serde(default)]
    pub config: DeliveryConfiguration,
    pub subtotal: Decimal,
    pub distance_meters: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct PreviewData {
    eligibility: EligibilityOutcome,
    breakdown: OrderCalculationResult,
    warnings: Vec<WarningItem>,
}

pub(super) async fn validate_config(
    Extension(req_id): Extension<RequestId>,
    Json(config): Json<DeliveryConfiguration>,
) -> Result<Json<ApiResponse<ValidationData>>, ApiError> {
    let warnings = config
        .validate()
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ValidationData {
            valid: true,
            warnings: warnings.into_iter().map(WarningItem::from).collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Live fee preview for a draft configuration.
///
/// Uses the same engine functions as order quoting, so the preview always
/// matches what a real order would be charged at that distance.
pub(super) async fn preview_fee(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PreviewBody>,
) -> Result<Json<ApiResponse<PreviewData>>, ApiError> {
    let warnings = body
        .config
        .validate()
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    let eligibility = check_minimum_order(body.subtotal, body.config.least_order_value);
    let breakdown = compute_total_fee(body.subtotal, body.distance_meters, &body.config)
        .map_err(|e| map_pricing_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: PreviewData {
            eligibility,
            breakdown,
            warnings: warnings.into_iter().map(WarningItem::from).collect(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
