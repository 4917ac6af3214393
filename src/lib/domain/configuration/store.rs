//! Where the "is configured" flag lives

use std::sync::{Mutex, PoisonError};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::email_addresses::EmailAddress, configuration::ConfigurationError,
};

/// Durable record of whether a mailbox has been configured
pub trait ConfigurationStore: Send + Sync + 'static {
    /// Whether sending is allowed
    fn is_configured(&self) -> bool;

    /// The configured mailbox, if any
    fn configured_email(&self) -> Option<EmailAddress>;

    /// Records `email` as the configured mailbox
    fn mark_configured(&self, email: &EmailAddress) -> Result<(), ConfigurationError>;

    /// Forgets the configured mailbox
    fn clear(&self) -> Result<(), ConfigurationError>;
}

#[cfg(test)]
mock! {
    pub ConfigurationStore {}

    impl ConfigurationStore for ConfigurationStore {
        fn is_configured(&self) -> bool;
        fn configured_email(&self) -> Option<EmailAddress>;
        fn mark_configured(&self, email: &EmailAddress) -> Result<(), ConfigurationError>;
        fn clear(&self) -> Result<(), ConfigurationError>;
    }
}

/// Configuration held only for the life of the process
#[derive(Debug, Default)]
pub struct InMemoryConfiguration {
    email: Mutex<Option<EmailAddress>>,
}

impl InMemoryConfiguration {
    /// A store already configured for `email`
    pub fn configured(email: EmailAddress) -> Self {
        Self {
            email: Mutex::new(Some(email)),
        }
    }
}

impl ConfigurationStore for InMemoryConfiguration {
    fn is_configured(&self) -> bool {
        self.configured_email().is_some()
    }

    fn configured_email(&self) -> Option<EmailAddress> {
        self.email
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn mark_configured(&self, email: &EmailAddress) -> Result<(), ConfigurationError> {
        *self.email.lock().unwrap_or_else(PoisonError::into_inner) = Some(email.clone());

        Ok(())
    }

    fn clear(&self) -> Result<(), ConfigurationError> {
        *self.email.lock().unwrap_or_else(PoisonError::into_inner) = None;

        Ok(())
    }
}
