use std::{env, net::SocketAddr, path::PathBuf};

use crate::middleware::authorization::ApiTokens;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:7002";

/// Settings of the web server, read from the environment.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub address: SocketAddr,
    pub tokens: ApiTokens,
    /// Directory below which the export folders are created.
    pub export_root: PathBuf,
}

impl WebConfig {
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        let address = env::var("WEB_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_ADDRESS.to_owned())
            .parse()?;
        let tokens = env::var("API_TOKENS")
            .map(|list| ApiTokens::parse(&list))
            .unwrap_or_default();
        let export_root = env::var("EXPORT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Ok(Self {
            address,
            tokens,
            export_root,
        })
    }
}
