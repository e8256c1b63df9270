// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig, SiteConfig, UpstreamConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Layering: file (optional) < `SITEDEV` environment variables < CLI.
    /// Every key has a default, so running without a config file works.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITEDEV").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("site.root", ".")?
            .set_default(
                "upstream.url",
                "https://app.remarked.ru/api/v1/ApiReservesWidget",
            )?
            .set_default("upstream.origin", "https://maxmaev7-coder.github.io")?
            .set_default(
                "upstream.referer",
                "https://maxmaev7-coder.github.io/sanapiro/booking.html",
            )?
            .set_default("upstream.route", "/api/remarked")?
            .set_default("upstream.timeout_secs", 15)?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    /// Load from the default "config" base name (config.toml)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
