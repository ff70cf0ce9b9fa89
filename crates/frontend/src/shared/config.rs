use contracts::domain::a001_delivery::{Building, FlatCatalog, DEFAULT_PAGE_SIZE, DELIVERY_TIME_LIMIT_SECS};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub flats: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Full base URL of the delivery service; empty means "same host as the page"
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub page_size: usize,
    pub timer_limit_secs: i64,
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "B STAR PHARMA".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timer_limit_secs: DELIVERY_TIME_LIMIT_SECS,
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown building in [flats]: {0}")]
    UnknownBuilding(String),
}

/// Configuration resolved at startup
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
    pub catalog: FlatCatalog,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 5000

[dashboard]
title = "B STAR PHARMA"
page_size = 10
timer_limit_secs = 300
currency_symbol = "₹"

[flats]
Requizza = ["101", "102", "103"]
Hydra = ["201", "202", "203"]
Hercules = ["301", "302", "303"]
Firenze = ["401", "402", "403"]
Brichwood = ["501", "502", "503"]
"#;

pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let config: Config = toml::from_str(contents)?;

    let mut entries = Vec::with_capacity(config.flats.len());
    for (name, flats) in config.flats {
        let building =
            Building::from_name(&name).ok_or_else(|| ConfigError::UnknownBuilding(name.clone()))?;
        entries.push((building, flats));
    }
    let catalog = if entries.is_empty() {
        FlatCatalog::default()
    } else {
        FlatCatalog::from_entries(entries)
    };

    Ok(AppConfig {
        api: config.api,
        dashboard: config.dashboard,
        catalog,
    })
}

/// Load the embedded configuration.
///
/// `DELIVERY_API_BASE` set at build time overrides `api.base_url`.
/// Falls back to built-in defaults if the embedded config is broken.
pub fn load_config() -> AppConfig {
    let mut config = match parse_config(DEFAULT_CONFIG) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}; using built-in defaults", e);
            AppConfig::default()
        }
    };

    if let Some(base) = option_env!("DELIVERY_API_BASE") {
        if !base.trim().is_empty() {
            config.api.base_url = base.trim().to_string();
        }
    }

    config
}

static CONFIG: Lazy<AppConfig> = Lazy::new(load_config);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 5000);
        assert!(config.api.base_url.is_empty());
        assert_eq!(config.dashboard, DashboardConfig::default());
        assert_eq!(config.catalog, FlatCatalog::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("[api]\nbase_url = \"http://deliveries.local\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://deliveries.local");
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.catalog, FlatCatalog::default());
    }

    #[test]
    fn test_custom_flats() {
        let config = parse_config("[flats]\nHydra = [\"2A\", \"2B\"]\n").unwrap();
        assert!(config.catalog.contains(Building::Hydra, "2B"));
        assert!(config.catalog.flats_for(Building::Requizza).is_empty());
    }

    #[test]
    fn test_unknown_building_is_rejected() {
        let err = parse_config("[flats]\nAtlantis = [\"1\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBuilding(name) if name == "Atlantis"));
    }
}
