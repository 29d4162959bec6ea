//! CLI configuration.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use bazaar_commerce::cart::{PricingRules, DEFAULT_CART_KEY};
use bazaar_commerce::catalog::DEFAULT_FEATURED_LIMIT;
use bazaar_commerce::{Currency, Money};
use serde::{Deserialize, Serialize};

/// File names looked up, in order, in each directory from the working
/// directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["bazaar.toml", ".bazaar.toml", "bazaar.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart slot lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order summary rules.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Diagnostic logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per slot.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Slot holding the cart.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_data_dir() -> String {
    ".bazaar".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog replacing the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Products shown by `bazaar featured`.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

fn default_featured_limit() -> usize {
    DEFAULT_FEATURED_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            featured_limit: default_featured_limit(),
        }
    }
}

/// Pricing configuration, amounts in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO 4217 code of the store currency.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_cents: i64,

    #[serde(default = "default_flat_shipping")]
    pub flat_shipping_cents: i64,

    /// Tax rate in basis points (800 = 8%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: i64,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_free_shipping_threshold() -> i64 {
    PricingRules::default().free_shipping_threshold.amount_cents
}

fn default_flat_shipping() -> i64 {
    PricingRules::default().flat_shipping.amount_cents
}

fn default_tax_rate_bps() -> i64 {
    PricingRules::default().tax_rate_bps
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            free_shipping_threshold_cents: default_free_shipping_threshold(),
            flat_shipping_cents: default_flat_shipping(),
            tax_rate_bps: default_tax_rate_bps(),
        }
    }
}

impl PricingConfig {
    /// The configured currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unsupported currency in config: {}", self.currency))
    }

    /// Pricing rules for the order summary.
    pub fn rules(&self) -> Result<PricingRules> {
        let currency = self.currency()?;
        if self.tax_rate_bps < 0 {
            return Err(anyhow!("tax_rate_bps must not be negative"));
        }

        Ok(PricingRules {
            free_shipping_threshold: Money::new(self.free_shipping_threshold_cents, currency),
            flat_shipping: Money::new(self.flat_shipping_cents, currency),
            tax_rate_bps: self.tax_rate_bps,
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `BAZAAR_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for terminals).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

/// Generate a default bazaar.toml config file.
pub fn generate_default_config() -> String {
    r#"# Bazaar storefront configuration

[storage]
data_dir = ".bazaar"
cart_key = "cart"

[catalog]
# path = "catalog.json"
featured_limit = 4

[pricing]
currency = "INR"
free_shipping_threshold_cents = 5000
flat_shipping_cents = 599
tax_rate_bps = 800

[logging]
# Overridden by the BAZAAR_LOG environment variable.
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: CliConfig = toml::from_str(
            r#"
            [pricing]
            tax_rate_bps = 1000
            "#,
        )
        .unwrap();

        assert_eq!(parsed.pricing.tax_rate_bps, 1000);
        assert_eq!(parsed.pricing.flat_shipping_cents, 599);
        assert_eq!(parsed.storage.cart_key, "cart");
        assert_eq!(parsed.catalog.featured_limit, 4);
        assert_eq!(parsed.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_pricing_rules() {
        let rules = PricingConfig::default().rules().unwrap();
        assert_eq!(rules, PricingRules::default());

        let bad = PricingConfig {
            currency: "XYZ".to_string(),
            ..PricingConfig::default()
        };
        assert!(bad.rules().is_err());
    }

    #[test]
    fn test_default_currency_matches_catalog() {
        let config = PricingConfig::default();
        assert_eq!(config.currency().unwrap(), Currency::INR);
        assert_eq!(config.rules().unwrap().flat_shipping, Money::new(599, Currency::INR));
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazaar.json");
        std::fs::write(
            &path,
            r#"{ "catalog": { "path": "catalog.json" }, "logging": { "format": "json" } }"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("catalog.json"));
        assert_eq!(config.catalog.featured_limit, 4);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazaar.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/var/lib/bazaar\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/bazaar");
        assert_eq!(config.storage.cart_key, "cart");
    }

    #[test]
    fn test_load_rejects_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazaar.toml");
        std::fs::write(&path, "[pricing\n").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }
}
