//! Verifying mailbox credentials on the backend

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Serialize;

use crate::domain::configuration::{
    ConfigurationError, CredentialVerifier, MailboxCredentials, Verification,
};

use super::{BackendClient, VERIFY_PATH};

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
    app_password: &'a str,
}

#[async_trait]
impl CredentialVerifier for BackendClient {
    async fn verify(
        &self,
        credentials: &MailboxCredentials,
    ) -> Result<Verification, ConfigurationError> {
        let response = self
            .client
            .post(self.endpoint(VERIFY_PATH))
            .json(&VerifyRequest {
                email: credentials.email.as_str(),
                app_password: credentials.app_password.expose(),
            })
            .send()
            .await
            .map_err(|err| ConfigurationError::Transport(err.into()))?;

        if !response.status().is_success() {
            return Err(ConfigurationError::Transport(anyhow!(
                "Server error: {}",
                response.status()
            )));
        }

        response
            .json::<Verification>()
            .await
            .map_err(|err| ConfigurationError::Transport(err.into()))
    }
}
