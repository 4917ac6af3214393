//! Configuration errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::email_addresses::EmailAddressError;

/// Errors raised while configuring a mailbox
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Address or password left empty
    #[error("Please fill in all fields")]
    MissingFields,

    /// The address is malformed
    #[error("Please provide a valid email address")]
    InvalidEmail,

    /// The provider refused the credentials
    #[error("{0}")]
    Rejected(String),

    /// The verification backend could not be reached
    #[error("Network error: Could not connect to server")]
    Transport(#[source] anyhow::Error),

    /// The configuration could not be persisted
    #[error("could not save configuration")]
    Storage(#[source] anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<EmailAddressError> for ConfigurationError {
    fn from(err: EmailAddressError) -> Self {
        debug!("EmailAddressError -> ConfigurationError");

        match err {
            EmailAddressError::EmptyEmailAddress => ConfigurationError::MissingFields,
            EmailAddressError::InvalidEmailAddress => ConfigurationError::InvalidEmail,
        }
    }
}
