//! Per-field validation results

use std::collections::{btree_map, BTreeMap};

use thiserror::Error;

use super::AttachmentRejection;

/// Draft fields that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// The recipient set
    Recipients,

    /// The uploaded recipient spreadsheet
    RecipientFile,

    /// The subject line
    Subject,

    /// The message body
    Body,

    /// The attachment list
    Attachments,
}

impl Field {
    /// Name used by the form controls
    pub fn name(self) -> &'static str {
        match self {
            Field::Recipients => "to",
            Field::RecipientFile => "excelFile",
            Field::Subject => "subject",
            Field::Body => "content",
            Field::Attachments => "attachments",
        }
    }
}

/// A problem with one field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// No recipients from either source
    #[error("Please add at least one recipient")]
    RecipientsMissing,

    /// Entries that are not addresses
    #[error("Invalid email addresses: {}", .0.join(", "))]
    RecipientsInvalid(Vec<String>),

    /// Spreadsheet extension not accepted
    #[error("Please upload an Excel or CSV file (.xlsx, .xls, .csv)")]
    RecipientFileType,

    /// Spreadsheet larger than 10MB
    #[error("Recipient file must be 10MB or smaller")]
    RecipientFileTooLarge,

    /// Spreadsheet could not be parsed
    #[error("{0}")]
    RecipientFileUnreadable(String),

    /// Subject blank
    #[error("Please enter a subject")]
    SubjectEmpty,

    /// Body has no visible text
    #[error("Please enter email content")]
    BodyEmpty,

    /// One or more attachments rejected
    #[error("{}", join_rejections(.0))]
    Attachments(Vec<AttachmentRejection>),
}

fn join_rejections(rejections: &[AttachmentRejection]) -> String {
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Field errors of a draft, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationResult {
    /// Whether there are no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error on `field`, if any
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Whether `field` has an error
    pub fn has(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over field errors in field order
    pub fn iter(&self) -> btree_map::Iter<'_, Field, FieldError> {
        self.errors.iter()
    }

    /// `field name: message` lines for display
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|(field, error)| format!("{}: {}", field.name(), error))
            .collect()
    }

    pub(crate) fn set(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub(crate) fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }
}
