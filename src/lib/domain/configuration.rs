//! Mailbox configuration: whether sending is allowed and how credentials are verified

mod credentials;
mod errors;
mod service;
mod store;

pub use credentials::{AppPassword, MailboxCredentials, Verification};
pub use errors::ConfigurationError;
pub use service::{ConfigurationService, CredentialVerifier};
pub use store::{ConfigurationStore, InMemoryConfiguration};
