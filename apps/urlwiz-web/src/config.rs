use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SYSTEM_CONFIG: &str = "/etc/urlwiz/web";
const LOCAL_CONFIG: &str = "urlwiz-web";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub listen_addr: String,
    pub listen_port: u16,
    /// Origin of the search API; `/api/...` paths are appended to it.
    pub api_url: String,
    pub feedback_email: String,
    pub analytics_id: Option<String>,
    /// Refresh interval of the page shown while a search is still being scored.
    pub poll_interval_secs: u64,
}

impl WebConfig {
    /// Layers built-in defaults, then `/etc/urlwiz/web.toml` and
    /// `./urlwiz-web.toml` (or only `explicit` when given), then `URLWIZ_*`
    /// environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("listen_addr", "0.0.0.0")?
            .set_default("listen_port", 3000)?
            .set_default("api_url", "http://localhost:8000")?
            .set_default("feedback_email", "feedback@urlwiz.io")?
            .set_default("poll_interval_secs", 5)?;

        builder = match explicit {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                builder.add_source(File::from(path).required(true))
            }
            None => builder
                .add_source(File::with_name(SYSTEM_CONFIG).required(false))
                .add_source(File::with_name(LOCAL_CONFIG).required(false)),
        };

        let mut config: WebConfig = builder
            .add_source(Environment::with_prefix("URLWIZ").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        config.analytics_id = config.analytics_id.filter(|id| !id.trim().is_empty());
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.listen_port)
    }
}
