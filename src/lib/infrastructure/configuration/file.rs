//! Configuration persisted as a JSON document

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    communication::email_addresses::EmailAddress,
    configuration::{ConfigurationError, ConfigurationStore},
};

/// Where the configuration document lives
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct ConfigurationFileConfig {
    /// Path of the configuration file
    #[arg(long = "config-path", env = "COMPOSER_CONFIG_PATH", default_value = ".composer.json")]
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct StoredConfiguration {
    #[serde(default)]
    email_configured: bool,

    #[serde(default)]
    user_email: Option<String>,
}

/// Configuration kept on disk between runs
#[derive(Debug, Clone)]
pub struct FileConfiguration {
    path: PathBuf,
}

impl FileConfiguration {
    /// Uses the document at `path`; it need not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoredConfiguration {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(_) => return StoredConfiguration::default(),
        };

        serde_json::from_slice(&raw).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "ignoring unreadable configuration");
            StoredConfiguration::default()
        })
    }

    fn save(&self, stored: &StoredConfiguration) -> Result<(), ConfigurationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))
                .map_err(ConfigurationError::Storage)?;
        }

        let json = serde_json::to_vec_pretty(stored)
            .context("failed to serialize configuration")
            .map_err(ConfigurationError::Storage)?;

        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))
            .map_err(ConfigurationError::Storage)?;

        debug!(path = %self.path.display(), "configuration saved");

        Ok(())
    }
}

impl ConfigurationStore for FileConfiguration {
    fn is_configured(&self) -> bool {
        self.configured_email().is_some()
    }

    fn configured_email(&self) -> Option<EmailAddress> {
        let stored = self.load();

        if !stored.email_configured {
            return None;
        }

        stored
            .user_email
            .and_then(|email| EmailAddress::new(&email).ok())
    }

    fn mark_configured(&self, email: &EmailAddress) -> Result<(), ConfigurationError> {
        self.save(&StoredConfiguration {
            email_configured: true,
            user_email: Some(email.to_string()),
        })
    }

    fn clear(&self) -> Result<(), ConfigurationError> {
        self.save(&StoredConfiguration::default())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_missing_file_is_unconfigured() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileConfiguration::new(dir.path().join("missing.json"));

        assert!(!store.is_configured());

        Ok(())
    }

    #[test]
    fn test_configuration_survives_reopening() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("composer.json");
        let email = EmailAddress::new("me@example.com")?;

        FileConfiguration::new(&path).mark_configured(&email)?;

        let reopened = FileConfiguration::new(&path);
        assert!(reopened.is_configured());
        assert_eq!(reopened.configured_email(), Some(email));

        reopened.clear()?;
        assert!(!FileConfiguration::new(&path).is_configured());

        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_unconfigured() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("composer.json");
        fs::write(&path, "{not json")?;

        assert!(!FileConfiguration::new(path).is_configured());

        Ok(())
    }
}
