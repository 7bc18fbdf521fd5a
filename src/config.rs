//! Connection settings for the Joplin Data API.
//!
//! The token is mandatory; host and port default to Joplin's Web Clipper
//! service on `localhost:41184`.

use crate::error::{JoplinError, Result};

/// Default Joplin host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default Joplin Web Clipper port.
pub const DEFAULT_PORT: u16 = 41184;

/// Connection settings for the Joplin Data API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Joplin API token (Tools > Options > Web Clipper).
    pub api_token: String,
    /// Joplin server host.
    pub host: String,
    /// Joplin server port.
    pub port: u16,
}

impl Config {
    /// Build a config from explicit values, falling back to the
    /// `JOPLIN_API_TOKEN`, `JOPLIN_HOST` and `JOPLIN_PORT` environment
    /// variables for anything not supplied.
    ///
    /// A missing token is fatal; there is no default.
    pub fn resolve(token: Option<String>, host: Option<String>, port: Option<u16>) -> Result<Self> {
        let api_token = match token.or_else(|| std::env::var("JOPLIN_API_TOKEN").ok()) {
            Some(t) if !t.is_empty() => t,
            _ => {
                return Err(JoplinError::Config(
                    "JOPLIN_API_TOKEN is required. Get your token from Joplin: \
                     Tools > Options > Web Clipper"
                        .to_string(),
                ))
            }
        };

        let host = host
            .or_else(|| std::env::var("JOPLIN_HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match port {
            Some(p) => p,
            None => match std::env::var("JOPLIN_PORT") {
                Ok(raw) => raw.parse::<u16>().map_err(|_| {
                    JoplinError::Config(format!("JOPLIN_PORT must be a valid port, got: {}", raw))
                })?,
                Err(_) => DEFAULT_PORT,
            },
        };

        Ok(Self {
            api_token,
            host,
            port,
        })
    }

    /// Base URL of the Joplin Data API.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
