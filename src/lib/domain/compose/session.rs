//! Compose session: the draft plus its validation and submission state machine

use std::{fmt, sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{
    communication::{
        recipient_files::RecipientFileParser,
        sender::{BulkEmailRequest, BulkSender, SendError, SendReport},
    },
    configuration::ConfigurationStore,
};

use super::{
    partition_addresses, Body, Draft, Field, FieldError, FileBlob, RecipientSource,
    SubmitError, TextField, ValidationResult, SPREADSHEET_EXTENSIONS,
};

/// Where the session is in the submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Editing
    Idle,

    /// Checking the draft before sending
    Validating,

    /// Waiting on the backend
    Submitting,

    /// A send is waiting for its delay to elapse
    Scheduled,

    /// Last send went through; the draft has been reset
    Succeeded,

    /// Last attempt failed; the draft is kept for correction
    Failed,
}

#[derive(Debug)]
struct ScheduledSend {
    handle: JoinHandle<Result<SendReport, SendError>>,
    delay: Duration,
}

/// One composer window and the campaign it is building
pub struct ComposeSession<S, P, C>
where
    S: BulkSender,
    P: RecipientFileParser,
    C: ConfigurationStore,
{
    draft: Draft,
    errors: ValidationResult,
    recipient_warning: Option<String>,
    submission_error: Option<String>,
    last_report: Option<SendReport>,
    state: SubmissionState,
    scheduled: Option<ScheduledSend>,
    sender: Arc<S>,
    parser: Arc<P>,
    configuration: Arc<C>,
}

impl<S, P, C> ComposeSession<S, P, C>
where
    S: BulkSender,
    P: RecipientFileParser,
    C: ConfigurationStore,
{
    /// Opens a session with an empty draft
    pub fn new(sender: Arc<S>, parser: Arc<P>, configuration: Arc<C>) -> Self {
        Self {
            draft: Draft::default(),
            errors: ValidationResult::default(),
            recipient_warning: None,
            submission_error: None,
            last_report: None,
            state: SubmissionState::Idle,
            scheduled: None,
            sender,
            parser,
            configuration,
        }
    }

    /// The current draft
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Current field errors
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Where the session is in the submit cycle
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Non-blocking note from the last recipient file, e.g. skipped entries
    pub fn recipient_warning(&self) -> Option<&str> {
        self.recipient_warning.as_deref()
    }

    /// Top-level message from the last failed send
    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    /// Report from the last successful send
    pub fn last_report(&self) -> Option<&SendReport> {
        self.last_report.as_ref()
    }

    /// Whether a scheduled send is pending; submit and schedule are refused meanwhile
    pub fn is_busy(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Delay of the pending scheduled send
    pub fn scheduled_delay(&self) -> Option<Duration> {
        self.scheduled.as_ref().map(|scheduled| scheduled.delay)
    }

    /// Adds typed addresses to the recipients.
    ///
    /// Well-formed entries are merged even when others are rejected; the
    /// rejected ones are listed in the returned error.
    pub fn set_recipients_from_list<I, T>(&mut self, addresses: I) -> Result<usize, FieldError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.touch();

        let (valid, invalid) = partition_addresses(addresses);

        if !valid.is_empty() {
            self.draft.recipients.set_source(RecipientSource::List);
        }

        let added = self.draft.recipients.merge(valid);

        if !invalid.is_empty() {
            debug!(count = invalid.len(), "rejected malformed recipients");

            let error = FieldError::RecipientsInvalid(invalid);
            self.errors.set(Field::Recipients, error.clone());

            return Err(error);
        }

        if !self.draft.recipients.is_empty() {
            self.errors.clear(Field::Recipients);
        }

        Ok(added)
    }

    /// Extracts recipients from an uploaded spreadsheet and merges them.
    ///
    /// Only `.xlsx`, `.xls` and `.csv` files up to 10MB are read. Malformed
    /// entries are skipped and counted in [`Self::recipient_warning`].
    pub async fn set_recipients_from_file(&mut self, file: FileBlob) -> Result<usize, FieldError> {
        self.touch();

        if !file.has_extension(SPREADSHEET_EXTENSIONS) {
            return Err(self.reject_recipient_file(FieldError::RecipientFileType));
        }

        if !file.within_size_limit() {
            return Err(self.reject_recipient_file(FieldError::RecipientFileTooLarge));
        }

        let raw = match self.parser.parse_recipients(&file).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(file = file.name(), error = %err, "could not parse recipient file");

                return Err(
                    self.reject_recipient_file(FieldError::RecipientFileUnreadable(
                        err.user_message(),
                    )),
                );
            }
        };

        let (valid, invalid) = partition_addresses(&raw);

        self.recipient_warning = match (valid.is_empty(), invalid.len()) {
            (true, 0) => Some("No valid email addresses found in the file".to_string()),
            (_, 0) => None,
            (_, skipped) => Some(format!("{} invalid email address(es) were skipped", skipped)),
        };

        let added = self.draft.recipients.merge(valid);

        self.draft.recipients.set_source(RecipientSource::Spreadsheet {
            name: file.name().to_string(),
            extension: file.extension().unwrap_or_default(),
            size: file.size(),
        });

        self.errors.clear(Field::RecipientFile);
        self.clear_missing_recipients();

        info!(file = file.name(), added, skipped = invalid.len(), "imported recipients");

        Ok(added)
    }

    /// Removes one recipient. Unknown addresses are ignored.
    pub fn remove_recipient(&mut self, address: &str) -> bool {
        if !self.draft.recipients.remove(address) {
            return false;
        }

        self.touch();

        if self.draft.recipients.is_empty() {
            self.errors.set(Field::Recipients, FieldError::RecipientsMissing);
        } else {
            self.clear_missing_recipients();
        }

        true
    }

    /// Assigns subject, Cc or Bcc
    pub fn set_field(&mut self, field: TextField, value: &str) {
        self.touch();

        match field {
            TextField::Subject => {
                self.draft.subject = value.to_string();

                if !value.trim().is_empty() {
                    self.errors.clear(Field::Subject);
                }
            }
            TextField::Cc => self.draft.cc = value.to_string(),
            TextField::Bcc => self.draft.bcc = value.to_string(),
        }
    }

    /// Replaces the body markup and re-derives its plain text
    pub fn update_body(&mut self, markup: &str) {
        self.touch();

        self.draft.body = Body::from_markup(markup);

        if !self.draft.body.is_visually_empty() {
            self.errors.clear(Field::Body);
        }
    }

    /// Attaches every file that passes the type, size and count limits.
    ///
    /// Rejected files are reported together; accepted ones stay attached.
    pub fn add_attachments(&mut self, files: Vec<FileBlob>) -> Result<(), FieldError> {
        self.touch();

        let rejections = self.draft.attachments.add(files);

        if rejections.is_empty() {
            self.errors.clear(Field::Attachments);

            return Ok(());
        }

        let error = FieldError::Attachments(rejections);
        self.errors.set(Field::Attachments, error.clone());

        Err(error)
    }

    /// Removes the attachment at `index`
    pub fn remove_attachment(&mut self, index: usize) -> Option<FileBlob> {
        self.touch();

        self.draft.attachments.remove(index)
    }

    /// Stores the signature appended on submission
    pub fn set_signature(&mut self, text: &str) {
        self.touch();

        self.draft.signature = text.to_string();
    }

    /// Recomputes every field error from scratch; true when the draft can be sent
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();

        self.errors.is_valid()
    }

    /// Empties the draft and its errors. A pending scheduled send is unaffected.
    pub fn discard(&mut self) {
        self.draft = Draft::default();
        self.errors = ValidationResult::default();
        self.recipient_warning = None;
        self.submission_error = None;

        if self.scheduled.is_none() {
            self.state = SubmissionState::Idle;
        }
    }

    /// Validates and sends the draft.
    ///
    /// On success the draft is reset. On failure it is kept and
    /// [`Self::submission_error`] explains why.
    pub async fn submit(&mut self) -> Result<SendReport, SubmitError> {
        let request = self.prepare()?;

        self.state = SubmissionState::Submitting;
        info!(recipients = request.to.len(), "submitting campaign");

        let outcome = self.sender.send_bulk(&request).await;

        self.finish(outcome)
    }

    /// Validates now and sends a snapshot of the draft after `delay`.
    ///
    /// Must be called from within a Tokio runtime. Collect the outcome with
    /// [`Self::complete_scheduled`].
    pub fn schedule_submit(&mut self, delay: Duration) -> Result<(), SubmitError> {
        let request = self.prepare()?;
        let sender = Arc::clone(&self.sender);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sender.send_bulk(&request).await
        });

        self.scheduled = Some(ScheduledSend { handle, delay });
        self.state = SubmissionState::Scheduled;

        info!(?delay, "campaign scheduled");

        Ok(())
    }

    /// Waits for the scheduled send and applies its outcome like [`Self::submit`].
    ///
    /// Dropping the returned future leaves the send pending, so it can still be
    /// cancelled.
    pub async fn complete_scheduled(&mut self) -> Result<SendReport, SubmitError> {
        let scheduled = self
            .scheduled
            .as_mut()
            .ok_or(SubmitError::NothingScheduled)?;

        let joined = (&mut scheduled.handle).await;

        self.scheduled = None;
        self.state = SubmissionState::Submitting;

        match joined {
            Ok(outcome) => self.finish(outcome),
            Err(err) => {
                warn!(error = %err, "scheduled send task failed");

                self.state = SubmissionState::Failed;
                self.submission_error = Some("The scheduled email could not be sent".to_string());

                Err(SubmitError::ScheduledTaskFailed(err.into()))
            }
        }
    }

    /// Aborts the pending scheduled send, if any
    pub fn cancel_scheduled(&mut self) -> bool {
        match self.scheduled.take() {
            Some(scheduled) => {
                scheduled.handle.abort();
                self.state = SubmissionState::Idle;

                info!("scheduled campaign cancelled");

                true
            }
            None => false,
        }
    }

    fn prepare(&mut self) -> Result<BulkEmailRequest, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::InFlight);
        }

        self.state = SubmissionState::Validating;
        self.submission_error = None;

        if !self.validate() {
            debug!(fields = self.errors.len(), "draft failed validation");

            self.state = SubmissionState::Failed;

            return Err(SubmitError::Invalid(self.errors.clone()));
        }

        if !self.configuration.is_configured() {
            warn!("no mailbox configured, redirecting to configuration");

            self.state = SubmissionState::Idle;

            return Err(SubmitError::NotConfigured);
        }

        Ok(self.draft.to_request())
    }

    fn finish(
        &mut self,
        outcome: Result<SendReport, SendError>,
    ) -> Result<SendReport, SubmitError> {
        let outcome = outcome.and_then(|report| {
            if report.success {
                Ok(report)
            } else {
                Err(SendError::Rejected(
                    report.error.or(report.message).unwrap_or_default(),
                ))
            }
        });

        match outcome {
            Ok(report) => {
                info!(
                    sent = report.sent_count(),
                    failed = report.failed_count(),
                    "campaign sent"
                );

                self.draft = Draft::default();
                self.errors = ValidationResult::default();
                self.recipient_warning = None;
                self.last_report = Some(report.clone());
                self.state = SubmissionState::Succeeded;

                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "campaign not sent");

                self.submission_error = Some(err.user_message());
                self.state = SubmissionState::Failed;

                Err(err.into())
            }
        }
    }

    fn reject_recipient_file(&mut self, error: FieldError) -> FieldError {
        debug!("recipient file rejected: {}", error);

        self.errors.set(Field::RecipientFile, error.clone());

        error
    }

    fn clear_missing_recipients(&mut self) {
        if self.errors.get(Field::Recipients) == Some(&FieldError::RecipientsMissing)
            && !self.draft.recipients.is_empty()
        {
            self.errors.clear(Field::Recipients);
        }
    }

    // Editing after an outcome starts a new cycle
    fn touch(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Succeeded | SubmissionState::Failed
        ) {
            self.state = SubmissionState::Idle;
        }
    }
}

impl<S, P, C> fmt::Debug for ComposeSession<S, P, C>
where
    S: BulkSender,
    P: RecipientFileParser,
    C: ConfigurationStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeSession")
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("state", &self.state)
            .field("scheduled", &self.scheduled_delay())
            .field("sender", &"BulkSender")
            .field("parser", &"RecipientFileParser")
            .field("configuration", &"ConfigurationStore")
            .finish()
    }
}
