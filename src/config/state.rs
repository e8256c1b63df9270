// Application state module
// Immutable per-process state shared across requests

use std::time::Duration;

use super::types::Config;

/// Application state
///
/// The server is single-threaded and handles one request at a time, so the
/// state is read-only: the loaded configuration plus one reusable upstream
/// client carrying the configured request timeout.
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
}

impl AppState {
    /// Build the shared state, constructing the upstream HTTP client
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}
