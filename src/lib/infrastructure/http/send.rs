//! Sending campaigns through the backend

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use tracing::{debug, info};

use crate::domain::communication::sender::{BulkEmailRequest, BulkSender, SendError, SendReport};

use super::{BackendClient, SEND_PATH};

#[async_trait]
impl BulkSender for BackendClient {
    async fn send_bulk(&self, request: &BulkEmailRequest) -> Result<SendReport, SendError> {
        let builder = self.client.post(self.endpoint(SEND_PATH));

        let builder = if request.attachments.is_empty() {
            builder.json(request)
        } else {
            builder.multipart(multipart_form(request)?)
        };

        info!(
            recipients = request.to.len(),
            attachments = request.attachments.len(),
            "posting campaign to backend"
        );

        let response = builder
            .send()
            .await
            .map_err(|err| SendError::Transport(err.into()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SendError::Transport(err.into()))?;

        debug!(%status, "backend replied");

        interpret(status, &body)
    }
}

fn multipart_form(request: &BulkEmailRequest) -> Result<Form, SendError> {
    let payload = serde_json::to_string(request)
        .map_err(|err| SendError::InvalidRequest(err.to_string()))?;

    let mut form = Form::new().text("payload", payload);

    for file in &request.attachments {
        let part = Part::bytes(file.data().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.content_type())
            .map_err(|err| SendError::InvalidRequest(err.to_string()))?;

        form = form.part("attachments", part);
    }

    Ok(form)
}

fn interpret(status: StatusCode, body: &str) -> Result<SendReport, SendError> {
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(SendError::NotConfigured);
    }

    let report: SendReport = match serde_json::from_str(body) {
        Ok(report) => report,
        Err(err) if status.is_success() => {
            return Err(SendError::MalformedResponse(err.to_string()));
        }
        Err(_) => return Err(SendError::Rejected(format!("Server error: {}", status))),
    };

    if status.is_success() && report.success {
        return Ok(report);
    }

    let message = report
        .error
        .or(report.message)
        .unwrap_or_else(|| format!("Server error: {}", status));

    if message.to_ascii_lowercase().contains("configur") {
        return Err(SendError::NotConfigured);
    }

    Err(SendError::Rejected(message))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        matchers::{body_partial_json, header_regex, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::domain::{communication::email_addresses::EmailAddress, compose::FileBlob};

    fn request() -> BulkEmailRequest {
        BulkEmailRequest {
            to: vec![EmailAddress::new_unchecked("a@x.com")],
            subject: "Hi".into(),
            content: "<p>Hello</p>".into(),
            plain_content: "Hello".into(),
            cc: String::new(),
            bcc: String::new(),
            attachments: vec![],
        }
    }

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::with_client(&server.uri(), reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_send_success() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .and(body_partial_json(json!({"to": ["a@x.com"], "subject": "Hi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Bulk email process completed",
                "sent_count": 1,
                "failed_count": 0,
                "failed_emails": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = client(&server).send_bulk(&request()).await?;

        assert_eq!(report.sent_count(), 1);
        assert_eq!(report.failed_count(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_send_with_attachments_uses_multipart() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .and(header_regex("content-type", "^multipart/form-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut request = request();
        request.attachments = vec![FileBlob::from_name("a.pdf", b"%PDF".to_vec())];

        let report = client(&server).send_bulk(&request).await?;

        assert!(report.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_send_rejected_by_backend() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"success": false, "error": "No recipients provided"})),
            )
            .mount(&server)
            .await;

        let result = client(&server).send_bulk(&request()).await;

        assert!(matches!(result, Err(SendError::Rejected(m)) if m == "No recipients provided"));
    }

    #[tokio::test]
    async fn test_send_not_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client(&server).send_bulk(&request()).await;

        assert!(matches!(result, Err(SendError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_send_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client(&server).send_bulk(&request()).await;

        assert!(matches!(result, Err(SendError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_send_transport_failure() {
        let client = BackendClient::with_client("http://127.0.0.1:1", reqwest::Client::new());

        let result = client.send_bulk(&request()).await;

        assert!(matches!(result, Err(SendError::Transport(_))));
    }

    #[test]
    fn test_interpret_configuration_message() {
        let result = interpret(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success": false, "error": "Email not configured"}"#,
        );

        assert!(matches!(result, Err(SendError::NotConfigured)));
    }
}
