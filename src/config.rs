use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_year")]
    pub year: i32,
    /// Date campaign status is evaluated against. `None` means "today".
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    #[serde(default = "default_customers")]
    pub customers: i64,
    #[serde(default = "default_products")]
    pub products: i64,
    #[serde(default = "default_orders")]
    pub orders: i64,
    #[serde(default = "default_campaigns")]
    pub campaigns: i64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_seed() -> u64 {
    2025
}
fn default_year() -> i32 {
    2025
}
fn default_customers() -> i64 {
    10_000
}
fn default_products() -> i64 {
    2_000
}
fn default_orders() -> i64 {
    50_000
}
fn default_campaigns() -> i64 {
    50
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            year: default_year(),
            reference_date: None,
            customers: default_customers(),
            products: default_products(),
            orders: default_orders(),
            campaigns: default_campaigns(),
        }
    }
}

impl Config {
    /// Load from `CONFIG_PATH` (default `datagen.toml`). A missing file is not
    /// an error: defaults are used. Environment variables override either way.
    pub fn load() -> AppResult<Self> {
        let config_path =
            env::var("CONFIG_PATH").unwrap_or_else(|_| "datagen.toml".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> AppResult<Self> {
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(config_path) {
            Ok(config_str) => toml::from_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config file at {config_path}, using defaults");
                Config::default()
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "cannot read config file {config_path}: {e}"
                )));
            }
        };

        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> AppResult<()> {
        if let Ok(v) = env::var("DATAGEN_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(v);
        }
        if let Some(v) = env_parse("DATAGEN_SEED")? {
            self.generation.seed = v;
        }
        if let Some(v) = env_parse("DATAGEN_YEAR")? {
            self.generation.year = v;
        }
        if let Some(v) = env_parse("DATAGEN_REFERENCE_DATE")? {
            self.generation.reference_date = Some(v);
        }
        if let Some(v) = env_parse("DATAGEN_CUSTOMERS")? {
            self.generation.customers = v;
        }
        if let Some(v) = env_parse("DATAGEN_PRODUCTS")? {
            self.generation.products = v;
        }
        if let Some(v) = env_parse("DATAGEN_ORDERS")? {
            self.generation.orders = v;
        }
        if let Some(v) = env_parse("DATAGEN_CAMPAIGNS")? {
            self.generation.campaigns = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        let g = &self.generation;
        for (name, count) in [
            ("customers", g.customers),
            ("products", g.products),
            ("orders", g.orders),
            ("campaigns", g.campaigns),
        ] {
            validate_count(name, count)?;
        }
        if !(2000..=2100).contains(&g.year) {
            return Err(AppError::ValidationError(format!(
                "year must be between 2000 and 2100, got {}",
                g.year
            )));
        }
        Ok(())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.generation
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Requested row counts must be positive; checked before any sampling.
pub fn validate_count(name: &str, count: i64) -> AppResult<usize> {
    if count <= 0 {
        return Err(AppError::ValidationError(format!(
            "{name} count must be positive, got {count}"
        )));
    }
    usize::try_from(count)
        .map_err(|_| AppError::ValidationError(format!("{name} count {count} is too large")))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::ConfigError(format!("invalid value for {name}: {v}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [generation]
            seed = 7
            customers = 5
            reference_date = "2025-06-30"
            "#,
        )
        .unwrap();
        assert_eq!(config.generation.seed, 7);
        assert_eq!(config.generation.customers, 5);
        assert_eq!(config.generation.products, 2_000);
        assert_eq!(config.generation.year, 2025);
        assert_eq!(config.output.dir, PathBuf::from("data"));
        assert_eq!(
            config.reference_date(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_counts() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.generation.orders = 0;
        assert!(matches!(
            config.validate(),
            Err(AppError::ValidationError(_))
        ));
        assert!(validate_count("customers", -3).is_err());
        assert_eq!(validate_count("customers", 3).unwrap(), 3);
    }

    #[test]
    fn test_validate_rejects_odd_year() {
        let mut config = Config::default();
        config.generation.year = 1999;
        assert!(config.validate().is_err());
    }
}
