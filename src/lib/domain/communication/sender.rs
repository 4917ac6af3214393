//! Bulk sending backend

mod errors;
mod report;
mod request;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::SendError;
pub use report::{FailedRecipient, SendReport};
pub use request::BulkEmailRequest;

/// The backend that dispatches a campaign to every recipient
#[async_trait]
pub trait BulkSender: Clone + Send + Sync + 'static {
    /// Sends one campaign.
    ///
    /// # Arguments
    /// * `request` - The [`BulkEmailRequest`] snapshot to send.
    ///
    /// # Returns
    /// - [`Ok`] with the backend's [`SendReport`] when the campaign was accepted.
    /// - [`Err`] with a [`SendError`] naming why it was not.
    async fn send_bulk(&self, request: &BulkEmailRequest) -> Result<SendReport, SendError>;
}

#[cfg(test)]
mock! {
    pub BulkSender {}

    impl Clone for BulkSender {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl BulkSender for BulkSender {
        async fn send_bulk(&self, request: &BulkEmailRequest) -> Result<SendReport, SendError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockBulkSender;
}
