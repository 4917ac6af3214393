//! Recipient set and where it came from

use indexmap::{set::Iter, IndexSet};

use crate::domain::communication::email_addresses::EmailAddress;

/// Extensions accepted for recipient spreadsheets
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// The most recent way recipients were supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientSource {
    /// Typed in as a list of addresses
    List,

    /// Extracted from an uploaded spreadsheet
    Spreadsheet {
        /// File name
        name: String,

        /// Lowercased extension
        extension: String,

        /// Size in bytes
        size: u64,
    },
}

/// Deduplicated recipient addresses in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients {
    addresses: IndexSet<EmailAddress>,
    source: Option<RecipientSource>,
}

impl Recipients {
    /// Merges addresses into the set, skipping ones already present.
    ///
    /// Returns how many were new.
    pub fn merge(&mut self, addresses: impl IntoIterator<Item = EmailAddress>) -> usize {
        let before = self.addresses.len();

        self.addresses.extend(addresses);

        self.addresses.len() - before
    }

    /// Removes `address`, returning whether it was present
    pub fn remove(&mut self, address: &str) -> bool {
        self.addresses.shift_remove(address)
    }

    /// Records where the latest recipients came from
    pub fn set_source(&mut self, source: RecipientSource) {
        self.source = Some(source);
    }

    /// Where the latest recipients came from
    pub fn source(&self) -> Option<&RecipientSource> {
        self.source.as_ref()
    }

    /// Whether `address` is in the set
    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    /// Number of recipients
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Iterate over the recipients
    pub fn iter(&self) -> Iter<'_, EmailAddress> {
        self.addresses.iter()
    }
}

/// Splits raw strings into well-formed addresses and the rejected originals.
///
/// Blank entries are neither.
pub fn partition_addresses<I, S>(raw: I) -> (Vec<EmailAddress>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for entry in raw {
        let entry = entry.as_ref();

        if entry.trim().is_empty() {
            continue;
        }

        match EmailAddress::new(entry) {
            Ok(address) => valid.push(address),
            Err(_) => invalid.push(entry.trim().to_string()),
        }
    }

    (valid, invalid)
}
