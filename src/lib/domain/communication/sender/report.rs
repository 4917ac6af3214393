//! Backend reply to a send

use std::collections::BTreeMap;

use serde::Deserialize;

/// A recipient the backend could not deliver to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FailedRecipient {
    /// The address
    pub email: String,

    /// The reason given
    #[serde(default)]
    pub error: String,
}

/// Outcome of a bulk send as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendReport {
    /// Whether the backend processed the campaign
    #[serde(default)]
    pub success: bool,

    /// Informational message
    #[serde(default)]
    pub message: Option<String>,

    /// Error message on failure
    #[serde(default)]
    pub error: Option<String>,

    /// Explicit sent count
    #[serde(default)]
    pub sent_count: Option<usize>,

    /// Explicit failed count
    #[serde(default)]
    pub failed_count: Option<usize>,

    /// Recipients that failed, with reasons
    #[serde(default)]
    pub failed_emails: Vec<FailedRecipient>,

    /// Free-form status per recipient, e.g. `"sent"` or `"failed: timeout"`
    #[serde(default)]
    pub results: Option<BTreeMap<String, String>>,
}

impl SendReport {
    /// Number of recipients sent to
    pub fn sent_count(&self) -> usize {
        match &self.results {
            Some(results) => results
                .values()
                .filter(|status| status_of(status) == Status::Sent)
                .count(),
            None => self.sent_count.unwrap_or(0),
        }
    }

    /// Number of recipients that failed
    pub fn failed_count(&self) -> usize {
        match &self.results {
            Some(results) => results
                .values()
                .filter(|status| status_of(status) == Status::Failed)
                .count(),
            None => self.failed_count.unwrap_or(self.failed_emails.len()),
        }
    }

    /// One-line summary for the user
    pub fn summary(&self) -> String {
        let sent = self.sent_count();
        let failed = self.failed_count();

        match failed {
            0 => format!("Email sent successfully to {} recipient(s)", sent),
            _ => format!("Sent to {} recipient(s), {} failed", sent, failed),
        }
    }
}

#[derive(PartialEq, Eq)]
enum Status {
    Sent,
    Failed,
    Other,
}

fn status_of(status: &str) -> Status {
    let status = status.to_ascii_lowercase();

    if status.contains("failed") {
        Status::Failed
    } else if status.contains("sent") {
        Status::Sent
    } else {
        Status::Other
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_counts_from_status_map() -> TestResult {
        let report: SendReport = serde_json::from_str(
            r#"{
                "success": true,
                "sent_count": 99,
                "results": {
                    "a@x.com": "Sent",
                    "b@x.com": "failed: mailbox full",
                    "c@x.com": "sent ok",
                    "d@x.com": "queued"
                }
            }"#,
        )?;

        assert_eq!(report.sent_count(), 2);
        assert_eq!(report.failed_count(), 1);

        Ok(())
    }

    #[test]
    fn test_counts_from_explicit_fields() -> TestResult {
        let report: SendReport = serde_json::from_str(
            r#"{
                "success": true,
                "message": "Bulk email process completed",
                "sent_count": 3,
                "failed_emails": [{"email": "z@x.com", "error": "550"}]
            }"#,
        )?;

        assert_eq!(report.sent_count(), 3);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.summary(), "Sent to 3 recipient(s), 1 failed");

        Ok(())
    }

    #[test]
    fn test_summary_without_failures() {
        let report = SendReport {
            success: true,
            sent_count: Some(2),
            ..Default::default()
        };

        assert_eq!(report.summary(), "Email sent successfully to 2 recipient(s)");
    }
}
