//! Submission errors

use thiserror::Error;

use crate::domain::communication::sender::SendError;

use super::ValidationResult;

/// Why a submit or schedule attempt did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft has field errors; nothing was sent
    #[error("please correct the highlighted fields")]
    Invalid(ValidationResult),

    /// No mailbox is configured; the user must configure one first
    #[error("email account is not configured")]
    NotConfigured,

    /// A submission or scheduled send is already pending
    #[error("a send is already in progress")]
    InFlight,

    /// There is no scheduled send to complete
    #[error("no send is scheduled")]
    NothingScheduled,

    /// The backend did not accept the campaign
    #[error(transparent)]
    Send(#[from] SendError),

    /// The scheduled send task ended without an outcome
    #[error("scheduled send did not complete")]
    ScheduledTaskFailed(#[source] anyhow::Error),
}

impl SubmitError {
    /// Whether the user must be sent to mailbox configuration
    pub fn requires_configuration(&self) -> bool {
        match self {
            SubmitError::NotConfigured => true,
            SubmitError::Send(err) => err.requires_configuration(),
            _ => false,
        }
    }
}
