use std::collections::HashSet;
use std::path::Path;

use dropoff_pricing::{ConfigWarning, Coordinate, DeliveryConfiguration};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// URL-safe identifier used in API paths and CLI flags.
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    /// Absent until the merchant saves delivery settings; defaults apply.
    #[serde(default)]
    pub delivery: Option<DeliveryConfiguration>,
}

impl ShopConfig {
    /// The delivery configuration in effect for this shop.
    #[must_use]
    pub fn effective_delivery(&self) -> DeliveryConfiguration {
        self.delivery.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct ShopsFile {
    pub shops: Vec<ShopConfig>,
}

impl ShopsFile {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ShopConfig> {
        self.shops.iter().find(|shop| shop.id == id)
    }
}

/// A delivery configuration warning attributed to a shop.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopWarning {
    pub shop_id: String,
    pub warning: ConfigWarning,
}

/// Load and validate the shops configuration from a YAML file.
///
/// Returns the parsed file together with any non-fatal delivery
/// configuration warnings.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_shops(path: &Path) -> Result<(ShopsFile, Vec<ShopWarning>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ShopsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let shops_file: ShopsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ShopsFileParse)?;

    let warnings = validate_shops(&shops_file)?;
    for w in &warnings {
        tracing::warn!(shop = %w.shop_id, warning = %w.warning, "delivery configuration warning");
    }

    Ok((shops_file, warnings))
}

fn validate_shops(shops_file: &ShopsFile) -> Result<Vec<ShopWarning>, ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut warnings = Vec::new();

    for shop in &shops_file.shops {
        if shop.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "shop id must be non-empty".to_string(),
            ));
        }

        if !shop
            .id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "shop id '{}' must contain only lowercase letters, digits and dashes",
                shop.id
            )));
        }

        if !seen_ids.insert(shop.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate shop id: '{}'",
                shop.id
            )));
        }

        shop.location.validate().map_err(|e| {
            ConfigError::Validation(format!("shop '{}' has an invalid location: {e}", shop.id))
        })?;

        let shop_warnings = shop.effective_delivery().validate().map_err(|e| {
            ConfigError::Validation(format!("shop '{}': {e}", shop.id))
        })?;
        warnings.extend(shop_warnings.into_iter().map(|warning| ShopWarning {
            shop_id: shop.id.clone(),
            warning,
        }));
    }

    Ok(warnings)
}
