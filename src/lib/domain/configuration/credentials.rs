//! Mailbox credentials

use std::fmt;

use serde::Deserialize;

use crate::domain::communication::email_addresses::EmailAddress;

/// Application-specific mailbox password, never printed
#[derive(Clone, PartialEq, Eq)]
pub struct AppPassword(String);

impl AppPassword {
    /// Wraps a raw password; surrounding whitespace is dropped
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// The raw password, for handing to the verifier
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the password is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AppPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl fmt::Debug for AppPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

/// Address plus app password to verify against the mail provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxCredentials {
    /// Mailbox address
    pub email: EmailAddress,

    /// App password
    pub app_password: AppPassword,
}

/// Verification verdict
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Verification {
    /// Whether the credentials were accepted
    #[serde(rename = "verify", default)]
    pub verified: bool,

    /// Human-readable explanation
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_password_is_obfuscated() {
        let password = AppPassword::new("abcd efgh ijkl mnop");

        assert_eq!(format!("{}", password), "********");
        assert_eq!(format!("{:?}", password), "********");
        assert_eq!(password.expose(), "abcd efgh ijkl mnop");
    }

    #[test]
    fn test_verification_reads_backend_field() -> testresult::TestResult {
        let verification: Verification =
            serde_json::from_str(r#"{"verify": true, "message": "ok"}"#)?;

        assert!(verification.verified);
        assert_eq!(verification.message.as_deref(), Some("ok"));

        Ok(())
    }
}
