//! Sending errors

use thiserror::Error;

/// Why the backend did not accept a campaign
#[derive(Debug, Error)]
pub enum SendError {
    /// No mailbox has been configured for sending
    #[error("email account is not configured")]
    NotConfigured,

    /// The backend declined the campaign
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// The backend could not be reached
    #[error("could not reach the server")]
    Transport(#[source] anyhow::Error),

    /// The backend replied with something that is not a report
    #[error("malformed response from server: {0}")]
    MalformedResponse(String),

    /// The request could not be assembled
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SendError {
    /// The message shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            SendError::NotConfigured => {
                "Please configure your email account before sending".to_string()
            }
            SendError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            SendError::Rejected(_) => "The server rejected the email".to_string(),
            SendError::Transport(_) => {
                "Cannot connect to server. Please ensure the backend is running.".to_string()
            }
            SendError::MalformedResponse(_) => {
                "The server returned an invalid response. Please try again.".to_string()
            }
            SendError::InvalidRequest(_) => {
                "The email could not be prepared for sending".to_string()
            }
        }
    }

    /// Whether the user has to configure a mailbox before retrying
    pub fn requires_configuration(&self) -> bool {
        matches!(self, SendError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_each_cause_has_a_distinct_message() {
        let messages = [
            SendError::NotConfigured.user_message(),
            SendError::Rejected(String::new()).user_message(),
            SendError::Transport(anyhow!("refused")).user_message(),
            SendError::MalformedResponse("eof".into()).user_message(),
            SendError::InvalidRequest("mime".into()).user_message(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_rejection_surfaces_server_message() {
        let error = SendError::Rejected("No recipients provided".into());

        assert_eq!(error.user_message(), "No recipients provided");
        assert!(!error.requires_configuration());
        assert!(SendError::NotConfigured.requires_configuration());
    }
}
