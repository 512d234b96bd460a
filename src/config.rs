use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Import pipeline configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// URL fetch timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Precise fetch timeout in milliseconds; wins over `timeout` when set
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// User agent sent with page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// OCR backend configuration
    #[serde(default)]
    pub ocr: OcrConfig,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            timeout_ms: None,
            user_agent: default_user_agent(),
            ocr: OcrConfig::default(),
        }
    }
}

/// Configuration for the image OCR backend
#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// Google Cloud Vision API key (falls back to GOOGLE_API_KEY)
    pub google_api_key: Option<String>,
    /// Vision `images:annotate` endpoint
    #[serde(default = "default_ocr_endpoint")]
    pub endpoint: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            endpoint: default_ocr_endpoint(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_ocr_endpoint() -> String {
    "https://vision.googleapis.com/v1/images:annotate".to_string()
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORTER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORTER__OCR__GOOGLE_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout_duration(&self) -> Duration {
        match self.timeout_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_secs(self.timeout),
        }
    }

    /// The configured Vision key, or the GOOGLE_API_KEY environment variable.
    pub fn google_api_key(&self) -> Option<String> {
        self.ocr
            .google_api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}

/// Load configuration from file and environment variables
///
/// See [`ImportConfig::load`] for the precedence rules.
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_IMPORTER__OCR__ENDPOINT
        .add_source(
            Environment::with_prefix("RECIPE_IMPORTER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
