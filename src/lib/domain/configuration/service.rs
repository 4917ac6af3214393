//! Verifying credentials and recording the result

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::email_addresses::EmailAddress,
    configuration::{
        AppPassword, ConfigurationError, ConfigurationStore, MailboxCredentials, Verification,
    },
};

/// Checks mailbox credentials with the mail provider
#[async_trait]
pub trait CredentialVerifier: Clone + Send + Sync + 'static {
    /// Verifies `credentials`.
    ///
    /// # Returns
    /// - [`Ok`] with the provider's [`Verification`], accepted or not.
    /// - [`Err`] with a [`ConfigurationError`] if the verifier could not be asked.
    async fn verify(
        &self,
        credentials: &MailboxCredentials,
    ) -> Result<Verification, ConfigurationError>;
}

#[cfg(test)]
mock! {
    pub CredentialVerifier {}

    impl Clone for CredentialVerifier {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl CredentialVerifier for CredentialVerifier {
        async fn verify(&self, credentials: &MailboxCredentials) -> Result<Verification, ConfigurationError>;
    }
}

/// Configures the mailbox used for sending
#[derive(Debug, Clone)]
pub struct ConfigurationService<V, C>
where
    V: CredentialVerifier,
    C: ConfigurationStore,
{
    verifier: Arc<V>,
    store: Arc<C>,
}

impl<V, C> ConfigurationService<V, C>
where
    V: CredentialVerifier,
    C: ConfigurationStore,
{
    /// Creates a new configuration service
    pub fn new(verifier: Arc<V>, store: Arc<C>) -> Self {
        Self { verifier, store }
    }

    /// Verifies the credentials and, if accepted, marks the store configured.
    ///
    /// # Returns
    /// The provider's success message.
    pub async fn configure(
        &self,
        email: &str,
        app_password: &str,
    ) -> Result<String, ConfigurationError> {
        let app_password = AppPassword::new(app_password);

        if email.trim().is_empty() || app_password.is_empty() {
            return Err(ConfigurationError::MissingFields);
        }

        let credentials = MailboxCredentials {
            email: EmailAddress::new(email)?,
            app_password,
        };

        let verification = self.verifier.verify(&credentials).await?;

        if !verification.verified {
            warn!(email = %credentials.email, "mailbox credentials rejected");

            return Err(ConfigurationError::Rejected(verification.message.unwrap_or_else(
                || "Failed to verify email configuration".to_string(),
            )));
        }

        self.store.mark_configured(&credentials.email)?;

        info!(email = %credentials.email, "mailbox configured");

        Ok(verification
            .message
            .unwrap_or_else(|| "Email configured successfully!".to_string()))
    }
}
