use clap::Parser;
use dropoff_core::{ShopConfig, ShopWarning, ShopsFile};
use dropoff_pricing::{compute_total_fee, ConfigWarning, Coordinate, DeliveryConfiguration, Quote};
use rust_decimal::Decimal;

use super::*;

fn shop() -> ShopConfig {
    ShopConfig {
        id: "gulberg-grocers".to_string(),
        name: "Gulberg Grocers".to_string(),
        location: Coordinate::new(31.5204, 74.3587),
        delivery: None,
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["dropoff-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert_eq!(cli.shops.to_str(), Some("./config/shops.yaml"));
}

#[test]
fn parses_quote_command() {
    let cli = Cli::try_parse_from([
        "dropoff-cli",
        "quote",
        "--shop",
        "gulberg-grocers",
        "--subtotal",
        "150.50",
        "--lat",
        "31.5234",
        "--lon",
        "74.3587",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Quote { ref shop, subtotal, .. })
            if shop == "gulberg-grocers" && subtotal == Decimal::new(15_050, 2)
    ));
}

#[test]
fn quote_accepts_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "dropoff-cli",
        "quote",
        "--shop",
        "x",
        "--subtotal",
        "10",
        "--lat",
        "-33.86",
        "--lon",
        "-70.65",
    ])
    .expect("negative coordinates should parse");
    assert!(matches!(
        cli.command,
        Some(Commands::Quote { lat, lon, .. }) if lat < 0.0 && lon < 0.0
    ));
}

#[test]
fn parses_distance_with_negative_positionals() {
    let cli = Cli::try_parse_from(["dropoff-cli", "distance", "40.7", "-74.0", "34.05", "-118.24"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Distance { lon1, .. }) if lon1 < 0.0));
}

#[test]
fn quote_requires_subtotal() {
    let result = Cli::try_parse_from([
        "dropoff-cli",
        "quote",
        "--shop",
        "x",
        "--lat",
        "1",
        "--lon",
        "1",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_check_config_with_shops_override() {
    let cli = Cli::try_parse_from(["dropoff-cli", "check-config", "--shops", "/tmp/shops.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    assert_eq!(cli.shops.to_str(), Some("/tmp/shops.yaml"));
}

#[test]
fn render_breakdown_lists_fees() {
    let breakdown =
        compute_total_fee(Decimal::from(150), 350.0, &DeliveryConfiguration::default()).unwrap();
    let out = pricing::render_breakdown(350.0, &breakdown);
    assert!(out.contains("base fee    30"), "{out}");
    assert!(out.contains("surcharge   40"), "{out}");
    assert!(out.contains("final fee   70"), "{out}");
    assert!(!out.contains("free delivery"), "{out}");
}

#[test]
fn render_quote_includes_total_cents() {
    let breakdown =
        compute_total_fee(Decimal::from(150), 350.0, &DeliveryConfiguration::default()).unwrap();
    let quote = Quote::Priced {
        distance_meters: 350.0,
        breakdown,
    };
    let out = pricing::render_quote(&shop(), Decimal::from(150), &quote).unwrap();
    assert!(out.starts_with("Gulberg Grocers (gulberg-grocers)"), "{out}");
    assert!(out.contains("22000 cents"), "{out}");
}

#[test]
fn render_quote_for_ineligible_order() {
    let quote = Quote::Ineligible {
        message: "Minimum order value is 100.".to_string(),
    };
    let out = pricing::render_quote(&shop(), Decimal::from(80), &quote).unwrap();
    assert!(out.contains("order not accepted"), "{out}");
    assert!(out.contains("100"), "{out}");
}

#[test]
fn render_check_lists_warnings() {
    let shops = ShopsFile {
        shops: vec![shop()],
    };
    let warnings = vec![ShopWarning {
        shop_id: "gulberg-grocers".to_string(),
        warning: ConfigWarning::UnsortedTiers,
    }];
    let out = pricing::render_check(&shops, &warnings);
    assert!(out.starts_with("1 shops ok, 1 warnings"), "{out}");
    assert!(out.contains("gulberg-grocers: distance tiers are not in ascending order"));
    assert_eq!(pricing::render_check(&shops, &[]), "1 shops ok\n");
}
