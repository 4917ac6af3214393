//! Extracting recipients from spreadsheets on the backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    communication::recipient_files::{
        RecipientFileError, RecipientFileParser, UNREADABLE_PREFIX,
    },
    compose::FileBlob,
};

use super::{BackendClient, UPLOAD_PATH};

const NO_ADDRESSES_FOUND: &str = "No valid email addresses found";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    emails: Vec<String>,

    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl RecipientFileParser for BackendClient {
    async fn parse_recipients(&self, file: &FileBlob) -> Result<Vec<String>, RecipientFileError> {
        let part = Part::bytes(file.data().to_vec()).file_name(file.name().to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|err| RecipientFileError::Transport(err.into()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RecipientFileError::Transport(err.into()))?;

        let reply: UploadResponse = serde_json::from_str(&body).map_err(|err| {
            debug!(%status, "unreadable upload reply");
            RecipientFileError::Unreadable(format!("unexpected server response: {}", err))
        })?;

        if reply.success {
            return Ok(reply.emails);
        }

        match reply.error {
            Some(error) if error.starts_with(NO_ADDRESSES_FOUND) => Ok(Vec::new()),
            Some(error) => Err(RecipientFileError::Unreadable(
                error
                    .strip_prefix(UNREADABLE_PREFIX)
                    .map(str::trim_start)
                    .unwrap_or(&error)
                    .to_string(),
            )),
            None => Err(RecipientFileError::Unreadable(format!(
                "server error: {}",
                status
            ))),
        }
    }
}
