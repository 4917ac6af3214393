//! Loading campaign history from the backend

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::campaigns::{CampaignHistory, CampaignHistoryError, CampaignSummary};

use super::{BackendClient, HISTORY_PATH};

#[derive(Debug, Deserialize)]
struct RecentBulkResponse {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    data: Vec<CampaignSummary>,
}

#[async_trait]
impl CampaignHistory for BackendClient {
    async fn recent_campaigns(&self) -> Result<Vec<CampaignSummary>, CampaignHistoryError> {
        let response = self
            .client
            .get(self.endpoint(HISTORY_PATH))
            .send()
            .await
            .map_err(|err| CampaignHistoryError::Transport(err.into()))?;

        if !response.status().is_success() {
            return Err(CampaignHistoryError::Transport(anyhow::anyhow!(
                "HTTP error! status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| CampaignHistoryError::Transport(err.into()))?;

        let reply: RecentBulkResponse = serde_json::from_str(&body)
            .map_err(|err| CampaignHistoryError::MalformedResponse(err.to_string()))?;

        if !reply.success {
            return Err(CampaignHistoryError::Unavailable);
        }

        Ok(reply.data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[tokio::test]
    async fn test_recent_campaigns() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(HISTORY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "id": "1",
                    "subject": "Launch",
                    "sender_email": "me@x.com",
                    "sent_time": "2026-03-01T10:00:00Z",
                    "success_count": 9,
                    "failed_count": 1
                }]
            })))
            .mount(&server)
            .await;

        let client = BackendClient::with_client(&server.uri(), reqwest::Client::new());

        let campaigns = client.recent_campaigns().await?;

        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].display_subject(), "Launch");
        assert_eq!(campaigns[0].recipient_count(), 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_recent_campaigns_with_backend_record_shapes() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(HISTORY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    {
                        "id": 12,
                        "subject": "Launch",
                        "sent_time": "2026-03-01T10:00:00.250000",
                        "timestamp": "2026-03-01T10:00:01Z",
                        "sent_emails": ["a@x.com", "b@x.com"],
                        "failed_emails": ["c@x.com"],
                        "content_html": "<p>Hi</p>"
                    },
                    {"subject": "Odd", "timestamp": "not a date", "id": null}
                ]
            })))
            .mount(&server)
            .await;

        let client = BackendClient::with_client(&server.uri(), reqwest::Client::new());

        let campaigns = client.recent_campaigns().await?;

        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].id.as_deref(), Some("12"));
        assert_eq!(campaigns[0].recipients.len(), 2);
        assert_eq!(campaigns[0].failed_recipients[0].email, "c@x.com");
        assert_eq!(campaigns[0].preview(), Some("<p>Hi</p>"));
        assert!(campaigns[0].sent_at().is_some());
        assert_eq!(campaigns[1].sent_at(), None);
        assert_eq!(campaigns[1].key(), None);

        Ok(())
    }

    #[tokio::test]
    async fn test_unsuccessful_history() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(HISTORY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let client = BackendClient::with_client(&server.uri(), reqwest::Client::new());

        assert!(matches!(
            client.recent_campaigns().await,
            Err(CampaignHistoryError::Unavailable)
        ));
    }
}
