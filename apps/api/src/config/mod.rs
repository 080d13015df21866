use crate::error::{ApiError, Result};
use serde::Deserialize;

const ENV_PREFIX: &str = "APP";

/// Runtime settings, layered as defaults then `APP_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Pretrained sentence-embedding model, e.g. `all-MiniLM-L6-v2`.
    pub model: String,
    /// Local model directory; takes precedence over `model` when set.
    #[serde(default)]
    pub model_path: Option<String>,
    pub use_gpu: bool,
    /// JSON file holding the catalog; the built-in catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<String>,
    /// Number of items returned per recommendation.
    pub top_n: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let config: Config = ::config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .set_default("model", "all-MiniLM-L6-v2")?
            .set_default("use_gpu", false)?
            .set_default("top_n", 3)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if config.top_n == 0 {
            return Err(ApiError::ConfigError(
                "top_n must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}
