//! Recipient file errors

use thiserror::Error;

/// Lead-in of the message shown for unreadable files
pub const UNREADABLE_PREFIX: &str = "Error reading file:";

/// Why a recipient file could not be turned into addresses
#[derive(Debug, Error)]
pub enum RecipientFileError {
    /// The parser does not handle this kind of file
    #[error("unsupported recipient file format: {0}")]
    UnsupportedFormat(String),

    /// The file contents could not be read
    #[error("could not read recipient file: {0}")]
    Unreadable(String),

    /// The parsing backend could not be reached
    #[error("could not reach the server")]
    Transport(#[source] anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl RecipientFileError {
    /// The message shown beside the upload control
    pub fn user_message(&self) -> String {
        match self {
            RecipientFileError::UnsupportedFormat(_) => {
                "Please upload an Excel or CSV file (.xlsx, .xls, .csv)".to_string()
            }
            RecipientFileError::Unreadable(reason) => match reason.trim_start() {
                reason if reason.starts_with(UNREADABLE_PREFIX) => reason.to_string(),
                reason => format!("{} {}", UNREADABLE_PREFIX, reason),
            },
            RecipientFileError::Transport(_) => {
                "Cannot connect to server. Please ensure the backend is running.".to_string()
            }
            RecipientFileError::UnknownError(_) => {
                "Something went wrong while reading the file".to_string()
            }
        }
    }
}
