//! Campaign history source

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

use super::CampaignSummary;

/// Errors loading campaign history
#[derive(Debug, Error)]
pub enum CampaignHistoryError {
    /// The backend answered but could not provide the history
    #[error("Failed to load campaigns data")]
    Unavailable,

    /// The backend could not be reached
    #[error("Cannot connect to server. Please ensure the backend is running.")]
    Transport(#[source] anyhow::Error),

    /// The backend replied with something unreadable
    #[error("malformed campaign history: {0}")]
    MalformedResponse(String),
}

/// Read-only list of past campaigns
#[async_trait]
pub trait CampaignHistory: Clone + Send + Sync + 'static {
    /// Most recent campaigns, newest first
    async fn recent_campaigns(&self) -> Result<Vec<CampaignSummary>, CampaignHistoryError>;
}

#[cfg(test)]
mock! {
    pub CampaignHistory {}

    impl Clone for CampaignHistory {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl CampaignHistory for CampaignHistory {
        async fn recent_campaigns(&self) -> Result<Vec<CampaignSummary>, CampaignHistoryError>;
    }
}
