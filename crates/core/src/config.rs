use serde::Deserialize;

/// Root application configuration. Loaded from an optional `adlens.toml`
/// file and environment variables with the prefix `ADLENS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Default path of the raw ads report when the CLI gives none.
    #[serde(default = "default_report_path")]
    pub report_path: String,
    /// Currency label shown next to spend figures. Display only; the
    /// pipeline never converts amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

// Default functions
fn default_report_path() -> String {
    "ads_data.csv".to_string()
}
fn default_currency() -> String {
    "NGN".to_string()
}
fn default_cache_enabled() -> bool {
    true
}
fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            currency: default_currency(),
            cache: CacheConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file and environment
    /// variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("adlens").required(false))
            .add_source(
                config::Environment::with_prefix("ADLENS")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.report_path, "ads_data.csv");
        assert_eq!(config.currency, "NGN");
        assert!(config.cache.enabled);
        assert_eq!(config.export.output_dir, ".");
    }
}
