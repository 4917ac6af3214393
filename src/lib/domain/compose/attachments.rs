//! Attachments and their constraints

use std::slice::Iter;

use thiserror::Error;
use tracing::debug;

use super::files::FileBlob;

/// Most attachments a draft can carry
pub const MAX_ATTACHMENTS: usize = 5;

/// Extensions accepted as attachments
pub const ATTACHMENT_EXTENSIONS: &[&str] =
    &["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "zip"];

/// Why a single attachment was turned away
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentRejection {
    /// Extension outside [`ATTACHMENT_EXTENSIONS`]
    #[error("{name}: file type is not allowed")]
    UnsupportedType {
        /// File name
        name: String,
    },

    /// Larger than 10MB
    #[error("{name}: file exceeds the 10MB limit")]
    TooLarge {
        /// File name
        name: String,

        /// Size in bytes
        size: u64,
    },

    /// Would exceed [`MAX_ATTACHMENTS`]
    #[error("{name}: no more than 5 attachments are allowed")]
    LimitReached {
        /// File name
        name: String,
    },
}

/// Ordered attachment list, never more than [`MAX_ATTACHMENTS`] long
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments(Vec<FileBlob>);

impl Attachments {
    /// Adds each file that passes on its own merits, in order.
    ///
    /// Returns the rejection for every file that was not added.
    pub fn add(&mut self, files: Vec<FileBlob>) -> Vec<AttachmentRejection> {
        let mut rejections = Vec::new();

        for file in files {
            match self.admit(&file) {
                Some(rejection) => {
                    debug!(file = file.name(), "attachment rejected: {}", rejection);
                    rejections.push(rejection);
                }
                None => self.0.push(file),
            }
        }

        rejections
    }

    fn admit(&self, file: &FileBlob) -> Option<AttachmentRejection> {
        let name = file.name().to_string();

        if !file.has_extension(ATTACHMENT_EXTENSIONS) {
            return Some(AttachmentRejection::UnsupportedType { name });
        }

        if !file.within_size_limit() {
            return Some(AttachmentRejection::TooLarge {
                name,
                size: file.size(),
            });
        }

        if self.0.len() >= MAX_ATTACHMENTS {
            return Some(AttachmentRejection::LimitReached { name });
        }

        None
    }

    /// Removes the attachment at `index`, if there is one
    pub fn remove(&mut self, index: usize) -> Option<FileBlob> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Re-checks every stored attachment against the size and count limits
    pub fn check(&self) -> Vec<AttachmentRejection> {
        let mut rejections: Vec<AttachmentRejection> = self
            .0
            .iter()
            .filter(|file| !file.within_size_limit())
            .map(|file| AttachmentRejection::TooLarge {
                name: file.name().to_string(),
                size: file.size(),
            })
            .collect();

        rejections.extend(
            self.0
                .iter()
                .skip(MAX_ATTACHMENTS)
                .map(|file| AttachmentRejection::LimitReached {
                    name: file.name().to_string(),
                }),
        );

        rejections
    }

    /// Number of attachments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attachments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the attachments in order
    pub fn iter(&self) -> Iter<'_, FileBlob> {
        self.0.iter()
    }

    /// The attachments as a slice
    pub fn as_slice(&self) -> &[FileBlob] {
        &self.0
    }
}
