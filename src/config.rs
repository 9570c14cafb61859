use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::AnalysisSpec;

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

fn default_data_dir() -> String {
    "./data".into()
}

fn default_from() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Directory holding one `<symbol>.json` observation file per product.
    #[serde(default = "default_data_dir")]
    pub dir: String,
    /// Start of the range when a product asks for its full history.
    #[serde(default = "default_from")]
    pub default_from: NaiveDate,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            default_from: default_from(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductConfig {
    pub id: u32,
    pub symbol: String,
    /// Days of history to analyze; `0` means everything since `data.default_from`.
    #[serde(default)]
    pub back_days: u32,
}

impl ProductConfig {
    pub fn to_spec(&self) -> AnalysisSpec {
        AnalysisSpec {
            id: self.id,
            symbol: self.symbol.clone(),
            back_days: self.back_days,
        }
    }
}

/// Load and validate an `AppConfig` from a TOML file at `path`.
pub fn load(path: &Path) -> Result<AppConfig, Report<ConfigError>> {
    let content = std::fs::read_to_string(path)
        .change_context(ConfigError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;

    let config: AppConfig = toml::from_str(&content).change_context(ConfigError::Parse {
        reason: "invalid TOML syntax or schema mismatch".into(),
    })?;

    validate(&config)?;

    Ok(config)
}

const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

fn validate(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    validate_log_format(config)?;
    validate_products(config)?;
    Ok(())
}

fn validate_log_format(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    if !VALID_LOG_FORMATS.contains(&config.general.log_format.as_str()) {
        return Err(Report::new(ConfigError::Validation {
            field: format!(
                "general.log_format \"{}\" is not one of {:?}",
                config.general.log_format, VALID_LOG_FORMATS
            ),
        }));
    }
    Ok(())
}

fn validate_products(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    let mut seen = HashSet::new();
    for product in &config.products {
        if product.symbol.trim().is_empty() {
            return Err(Report::new(ConfigError::Validation {
                field: format!("products[id={}].symbol must not be empty", product.id),
            }));
        }
        if !seen.insert(product.id) {
            return Err(Report::new(ConfigError::Validation {
                field: format!("products: duplicate id {}", product.id),
            }));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        toml::from_str(toml).expect("parse failed")
    }

    #[test]
    fn valid_full_config_parses() {
        let toml = r#"
[general]
log_level = "debug"
log_format = "json"

[data]
dir = "/tmp/prices"
default_from = "2010-06-01"

[[products]]
id = 1
symbol = "ES"
back_days = 365

[[products]]
id = 2
symbol = "NQ"
"#;
        let config = parse(toml);
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.data.dir, "/tmp/prices");
        assert_eq!(
            config.data.default_from,
            NaiveDate::from_ymd_opt(2010, 6, 1).unwrap()
        );
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].back_days, 365);
        assert_eq!(config.products[1].back_days, 0);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn defaults_applied_when_sections_omitted() {
        let config = parse("");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "text");
        assert_eq!(config.data.dir, "./data");
        assert_eq!(
            config.data.default_from,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
        );
        assert!(config.products.is_empty());
    }

    #[test]
    fn unknown_log_format_rejected() {
        let config = parse(
            r#"
[general]
log_format = "xml"
"#,
        );
        assert!(validate(&config).is_err());
    }

    #[test]
    fn duplicate_product_ids_rejected() {
        let config = parse(
            r#"
[[products]]
id = 1
symbol = "ES"

[[products]]
id = 1
symbol = "NQ"
"#,
        );
        assert!(validate(&config).is_err());
    }

    #[test]
    fn empty_symbol_rejected() {
        let config = parse(
            r#"
[[products]]
id = 3
symbol = " "
"#,
        );
        assert!(validate(&config).is_err());
    }

    #[test]
    fn product_converts_to_spec() {
        let product = ProductConfig {
            id: 9,
            symbol: "CL".into(),
            back_days: 30,
        };
        let spec = product.to_spec();
        assert_eq!(spec.id, 9);
        assert_eq!(spec.symbol, "CL");
        assert_eq!(spec.back_days, 30);
    }
}
