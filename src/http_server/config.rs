//! Listener settings for the registry API
//!
//! Read from the `http` object of the registry config file. Every key is
//! optional; an absent key falls back to the local development setup
//! (port 3000, with the front-end dev servers allowed through CORS).

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Where the registry listens and which browser origins may call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to bind, all interfaces unless set
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins sent back in `Access-Control-Allow-Origin`; an empty list
    /// lets any origin through
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` for the listener to bind
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject settings the listener could not honor.
    ///
    /// An origin that is not a valid header value would otherwise be
    /// dropped from the CORS list without notice.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("http.host must not be empty".to_string());
        }

        for origin in &self.cors_origins {
            if origin.trim().is_empty() || HeaderValue::from_str(origin).is_err() {
                return Err(format!("http.cors_origins has an unusable origin: {:?}", origin));
            }
        }

        Ok(())
    }
}
