//! Past campaign summary

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::communication::sender::FailedRecipient;

/// One previously sent campaign
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CampaignSummary {
    /// Backend identifier, textual or numeric
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,

    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Mailbox it was sent from
    #[serde(default)]
    pub sender_email: String,

    /// When it was sent
    #[serde(default, deserialize_with = "lenient_time")]
    pub sent_time: Option<DateTime<Utc>>,

    /// When the record was written; stands in for `sent_time` on older records
    #[serde(default, deserialize_with = "lenient_time")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Recipients delivered to
    #[serde(default)]
    pub success_count: usize,

    /// Recipients that failed
    #[serde(default)]
    pub failed_count: usize,

    /// Recipients targeted, when reported
    #[serde(default)]
    pub total_emails: Option<usize>,

    /// Addresses delivered to
    #[serde(default, alias = "sent_emails", deserialize_with = "addresses")]
    pub recipients: Vec<String>,

    /// Addresses that failed, with reasons when the backend gave one
    #[serde(default, alias = "failed_emails", deserialize_with = "failures")]
    pub failed_recipients: Vec<FailedRecipient>,

    /// Plain body snapshot
    #[serde(default)]
    pub content: Option<String>,

    /// HTML body snapshot
    #[serde(default)]
    pub content_html: Option<String>,
}

impl CampaignSummary {
    /// The subject, or a placeholder when it was left blank
    pub fn display_subject(&self) -> &str {
        match self.subject.trim() {
            "" => "Untitled Campaign",
            subject => subject,
        }
    }

    /// How many recipients the campaign targeted
    pub fn recipient_count(&self) -> usize {
        match self.total_emails {
            Some(total) if total > 0 => total,
            _ => self.success_count + self.failed_count,
        }
    }

    /// Send time, falling back to the record timestamp
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.sent_time.or(self.timestamp)
    }

    /// Stable key for the record: its id, else its timestamp
    pub fn key(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| self.timestamp.map(|time| time.to_rfc3339()))
    }

    /// Body to preview, HTML first
    pub fn preview(&self) -> Option<&str> {
        self.content_html
            .as_deref()
            .or(self.content.as_deref())
            .filter(|content| !content.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FailedEntry {
    Address(String),
    Detailed(FailedRecipient),
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

// Unreadable times become None rather than failing the whole history
fn lenient_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| parse_time(&value)))
}

fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => {
            let text = text.trim();

            DateTime::parse_from_rfc3339(text)
                .or_else(|_| DateTime::parse_from_rfc2822(text))
                .map(|time| time.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                        .iter()
                        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                        .map(|time| time.and_utc())
                })
        }
        Value::Number(seconds) => seconds
            .as_i64()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
        _ => None,
    }
}

fn addresses<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn failures<'de, D>(deserializer: D) -> Result<Vec<FailedRecipient>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FailedEntry>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            FailedEntry::Address(email) => FailedRecipient {
                email,
                error: String::new(),
            },
            FailedEntry::Detailed(failed) => failed,
        })
        .collect())
}
