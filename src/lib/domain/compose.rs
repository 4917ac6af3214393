//! Composing a bulk campaign: draft state, validation and submission

mod attachments;
mod body;
mod draft;
mod errors;
mod files;
mod recipients;
mod session;
mod validation;

pub use attachments::{AttachmentRejection, Attachments, ATTACHMENT_EXTENSIONS, MAX_ATTACHMENTS};
pub use body::{html_to_plain, Body};
pub use draft::{Draft, TextField};
pub use errors::SubmitError;
pub use files::{FileBlob, MAX_FILE_SIZE};
pub use recipients::{partition_addresses, RecipientSource, Recipients, SPREADSHEET_EXTENSIONS};
pub use session::{ComposeSession, SubmissionState};
pub use validation::{Field, FieldError, ValidationResult};
