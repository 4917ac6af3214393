//! The in-progress campaign

use crate::domain::communication::sender::BulkEmailRequest;

use super::{Attachments, Body, Field, FieldError, Recipients, ValidationResult};

/// Plain text fields set by direct assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// Subject line
    Subject,

    /// Comma-separated Cc addresses
    Cc,

    /// Comma-separated Bcc addresses
    Bcc,
}

/// One campaign being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub(crate) recipients: Recipients,
    pub(crate) subject: String,
    pub(crate) body: Body,
    pub(crate) cc: String,
    pub(crate) bcc: String,
    pub(crate) attachments: Attachments,
    pub(crate) signature: String,
}

impl Draft {
    /// Recipients
    pub fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    /// Subject line
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Cc addresses as typed
    pub fn cc(&self) -> &str {
        &self.cc
    }

    /// Bcc addresses as typed
    pub fn bcc(&self) -> &str {
        &self.bcc
    }

    /// Attachments
    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    /// Signature as typed
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Whether nothing has been entered
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks every submission rule from scratch
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.recipients.is_empty() {
            result.set(Field::Recipients, FieldError::RecipientsMissing);
        }

        if self.subject.trim().is_empty() {
            result.set(Field::Subject, FieldError::SubjectEmpty);
        }

        if self.body.is_visually_empty() {
            result.set(Field::Body, FieldError::BodyEmpty);
        }

        let rejections = self.attachments.check();
        if !rejections.is_empty() {
            result.set(Field::Attachments, FieldError::Attachments(rejections));
        }

        result
    }

    /// Snapshot of the draft in the shape the backend expects, signature appended
    pub fn to_request(&self) -> BulkEmailRequest {
        let body = self.body.with_signature(&self.signature);

        BulkEmailRequest {
            to: self.recipients.iter().cloned().collect(),
            subject: self.subject.trim().to_string(),
            content: body.markup().to_string(),
            plain_content: body.plain().to_string(),
            cc: self.cc.trim().to_string(),
            bcc: self.bcc.trim().to_string(),
            attachments: self.attachments.as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::domain::{communication::email_addresses::EmailAddress, compose::FileBlob};

    fn valid_draft() -> TestResult<Draft> {
        let mut draft = Draft::default();
        draft.recipients.merge(vec![EmailAddress::new("a@x.com")?]);
        draft.subject = "Hi".into();
        draft.body = Body::from_markup("<p>Hello</p>");

        Ok(draft)
    }

    #[test]
    fn test_empty_draft_fails_every_required_field() {
        let result = Draft::default().validate();

        assert_eq!(result.get(Field::Recipients), Some(&FieldError::RecipientsMissing));
        assert_eq!(result.get(Field::Subject), Some(&FieldError::SubjectEmpty));
        assert_eq!(result.get(Field::Body), Some(&FieldError::BodyEmpty));
        assert!(!result.has(Field::Attachments));
    }

    #[test]
    fn test_placeholder_body_fails() -> TestResult {
        let mut draft = valid_draft()?;
        draft.body = Body::from_markup("<p><br></p>");

        let result = draft.validate();

        assert_eq!(result.len(), 1);
        assert_eq!(result.get(Field::Body), Some(&FieldError::BodyEmpty));

        Ok(())
    }

    #[test]
    fn test_whitespace_subject_fails() -> TestResult {
        let mut draft = valid_draft()?;
        draft.subject = "   ".into();

        assert!(draft.validate().has(Field::Subject));

        Ok(())
    }

    #[test]
    fn test_valid_draft_without_optional_fields() -> TestResult {
        assert!(valid_draft()?.validate().is_valid());

        Ok(())
    }

    #[test]
    fn test_request_appends_signature() -> TestResult {
        let mut draft = valid_draft()?;
        draft.signature = "Cheers".into();
        draft.cc = " c@x.com ".into();
        draft.attachments.add(vec![FileBlob::from_name("a.pdf", vec![1])]);

        let request = draft.to_request();

        assert_eq!(request.to, vec![EmailAddress::new("a@x.com")?]);
        assert_eq!(request.content, "<p>Hello</p><br>---<br>Cheers");
        assert_eq!(request.plain_content, "Hello\n---\nCheers");
        assert_eq!(request.cc, "c@x.com");
        assert_eq!(request.bcc, "");
        assert_eq!(request.attachments.len(), 1);

        Ok(())
    }
}
