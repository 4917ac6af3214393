//! Outbound campaign payload

use serde::Serialize;

use crate::domain::{communication::email_addresses::EmailAddress, compose::FileBlob};

/// Everything the backend needs to send one campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkEmailRequest {
    /// Recipients, each sent an individual copy
    pub to: Vec<EmailAddress>,

    /// Subject line
    pub subject: String,

    /// HTML body, signature included
    pub content: String,

    /// Plain-text body, signature included
    pub plain_content: String,

    /// Comma-separated Cc addresses
    pub cc: String,

    /// Comma-separated Bcc addresses
    pub bcc: String,

    /// Files sent alongside the JSON payload
    #[serde(skip)]
    pub attachments: Vec<FileBlob>,
}
