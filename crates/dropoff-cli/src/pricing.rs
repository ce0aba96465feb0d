//! Pricing command handlers for the CLI.
//!
//! Each handler loads the shops file, runs the pricing engine and prints a
//! plain-text report. Formatting lives in separate `render_*` functions so
//! the output can be checked without capturing stdout.

use std::path::Path;

use anyhow::Context;
use dropoff_core::{load_shops, ShopConfig, ShopWarning, ShopsFile};
use dropoff_pricing::{
    check_minimum_order, compute_total_fee, distance_between, quote_order, Coordinate,
    OrderCalculationResult, OrderCharges, Quote, QuoteRequest,
};
use rust_decimal::Decimal;

fn find_shop<'a>(shops: &'a ShopsFile, shop_id: &str) -> anyhow::Result<&'a ShopConfig> {
    shops.find(shop_id).with_context(|| {
        let known: Vec<&str> = shops.shops.iter().map(|s| s.id.as_str()).collect();
        format!("unknown shop '{shop_id}'; known shops: {}", known.join(", "))
    })
}

/// Quote an order for a consumer at (`lat`, `lon`).
///
/// # Errors
///
/// Returns an error if the shops file cannot be loaded, the shop is unknown,
/// or the engine rejects the input or configuration.
pub(crate) fn run_quote(
    shops_path: &Path,
    shop_id: &str,
    subtotal: Decimal,
    lat: f64,
    lon: f64,
) -> anyhow::Result<()> {
    let (shops, _) = load_shops(shops_path)?;
    let shop = find_shop(&shops, shop_id)?;
    tracing::debug!(shop_id, %subtotal, lat, lon, "quoting order");

    let quote = quote_order(
        &QuoteRequest {
            subtotal,
            consumer: Coordinate::new(lat, lon),
            shop: shop.location,
        },
        &shop.effective_delivery(),
    )
    .with_context(|| format!("failed to quote order for shop '{shop_id}'"))?;

    print!("{}", render_quote(shop, subtotal, &quote)?);
    Ok(())
}

/// Preview the fee for a known distance, as the settings screen does.
///
/// # Errors
///
/// Returns an error if the shops file cannot be loaded, the shop is unknown,
/// or the engine rejects the input or configuration.
pub(crate) fn run_preview(
    shops_path: &Path,
    shop_id: &str,
    subtotal: Decimal,
    distance_meters: f64,
) -> anyhow::Result<()> {
    let (shops, _) = load_shops(shops_path)?;
    let shop = find_shop(&shops, shop_id)?;
    let config = shop.effective_delivery();

    let eligibility = check_minimum_order(subtotal, config.least_order_value);
    if let Some(message) = &eligibility.message {
        println!("note: {message}");
    }
    let breakdown = compute_total_fee(subtotal, distance_meters, &config)
        .with_context(|| format!("failed to preview fee for shop '{shop_id}'"))?;

    print!("{}", render_breakdown(distance_meters, &breakdown));
    Ok(())
}

/// Print the great-circle distance between two points.
///
/// # Errors
///
/// Returns an error if either coordinate is invalid.
pub(crate) fn run_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> anyhow::Result<()> {
    let meters = distance_between(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2))?;
    println!("{meters:.1} m");
    Ok(())
}

/// Validate the shops file and list every configuration warning.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub(crate) fn run_check_config(shops_path: &Path) -> anyhow::Result<()> {
    let (shops, warnings) = load_shops(shops_path)
        .with_context(|| format!("shops file {} is invalid", shops_path.display()))?;
    print!("{}", render_check(&shops, &warnings));
    Ok(())
}

pub(crate) fn render_quote(
    shop: &ShopConfig,
    subtotal: Decimal,
    quote: &Quote,
) -> anyhow::Result<String> {
    match quote {
        Quote::Ineligible { message } => Ok(format!(
            "{} ({}): order not accepted\n  {message}\n",
            shop.name, shop.id
        )),
        Quote::Priced {
            distance_meters,
            breakdown,
        } => {
            let charges = OrderCharges::from_breakdown(subtotal, breakdown)?;
            let mut out = format!("{} ({})\n", shop.name, shop.id);
            out.push_str(&render_breakdown(*distance_meters, breakdown));
            out.push_str(&format!("  {:<12}{} cents\n", "total", charges.total_cents));
            Ok(out)
        }
    }
}

pub(crate) fn render_breakdown(distance_meters: f64, breakdown: &OrderCalculationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {:<12}{distance_meters:.1} m\n", "distance"));
    out.push_str(&format!("  {:<12}{}\n", "base fee", breakdown.base_fee));
    out.push_str(&format!("  {:<12}{}\n", "surcharge", breakdown.surcharge));
    out.push_str(&format!("  {:<12}{}\n", "final fee", breakdown.final_fee));
    if breakdown.free_delivery_applied {
        out.push_str("  free delivery applied\n");
    }
    if breakdown.out_of_zone {
        out.push_str("  outside configured delivery tiers\n");
    }
    out
}

pub(crate) fn render_check(shops: &ShopsFile, warnings: &[ShopWarning]) -> String {
    let mut out = format!("{} shops ok", shops.shops.len());
    if warnings.is_empty() {
        out.push('\n');
        return out;
    }
    out.push_str(&format!(", {} warnings\n", warnings.len()));
    for w in warnings {
        out.push_str(&format!("  {}: {}\n", w.shop_id, w.warning));
    }
    out
}
