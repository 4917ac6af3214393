//! HTTP client for the bulk email backend

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use reqwest::Client;

mod history;
mod send;
mod upload;
mod verify;

/// Route that sends a campaign
pub const SEND_PATH: &str = "/api/send-bulk-email";

/// Route that extracts addresses from a spreadsheet
pub const UPLOAD_PATH: &str = "/api/upload-excel";

/// Route that verifies mailbox credentials
pub const VERIFY_PATH: &str = "/verify";

/// Route that lists recent campaigns
pub const HISTORY_PATH: &str = "/recent_bulk";

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct BackendConfig {
    /// Base URL of the bulk email backend
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:5000")]
    pub backend_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

/// Client for every backend route the composer uses
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Creates a client for the backend described by `config`
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self::with_client(&config.backend_url, client))
    }

    /// Creates a client around an existing [`Client`]
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() -> TestResult {
        let client = BackendClient::new(&BackendConfig {
            backend_url: "http://localhost:5000/".to_string(),
            timeout_secs: 5,
        })?;

        assert_eq!(
            client.endpoint(SEND_PATH),
            "http://localhost:5000/api/send-bulk-email"
        );

        Ok(())
    }
}
