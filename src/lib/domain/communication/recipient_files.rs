//! Extracting recipient addresses from uploaded spreadsheets

mod errors;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::compose::FileBlob;

pub use errors::{RecipientFileError, UNREADABLE_PREFIX};

/// Turns a spreadsheet or CSV file into the address-like strings it contains
#[async_trait]
pub trait RecipientFileParser: Clone + Send + Sync + 'static {
    /// Parses `file`.
    ///
    /// # Returns
    /// Every cell that looks like an address, in no particular order. May be empty.
    async fn parse_recipients(&self, file: &FileBlob) -> Result<Vec<String>, RecipientFileError>;
}

#[cfg(test)]
mock! {
    pub RecipientFileParser {}

    impl Clone for RecipientFileParser {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl RecipientFileParser for RecipientFileParser {
        async fn parse_recipients(&self, file: &FileBlob) -> Result<Vec<String>, RecipientFileError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockRecipientFileParser;
}
