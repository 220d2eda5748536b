use super::sender::SendOutcome;
use crate::config::PostmarkConfig;
use serde::{Deserialize, Serialize};
use tracing::error;

const POSTMARK_API_URL: &str = "https://api.postmarkapp.com/email";

/// Postmark REST client for transactional email.
pub struct PostmarkClient {
    http: reqwest::Client,
    config: PostmarkConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    tag: &'a str,
    message_stream: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkEmailResponse {
    #[serde(rename = "MessageID")]
    message_id: Option<String>,
    message: Option<String>,
}

impl PostmarkClient {
    pub fn new(config: PostmarkConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> SendOutcome {
        let request = PostmarkEmailRequest {
            from: &self.config.from_email,
            to,
            subject,
            text_body: body,
            tag: "reminder",
            message_stream: "outbound",
        };

        let res = match self
            .http
            .post(POSTMARK_API_URL)
            .header("X-Postmark-Server-Token", &self.config.server_token)
            .json(&request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("Postmark request failed: {:?}", e);
                return SendOutcome::failed(e.to_string());
            }
        };

        let status = res.status();
        let body = res.json::<PostmarkEmailResponse>().await.ok();

        if status.is_success() {
            SendOutcome::delivered(body.and_then(|b| b.message_id))
        } else {
            let message = body
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("Postmark returned status {}", status));
            error!("Postmark send failed: {}", message);
            SendOutcome::failed(message)
        }
    }
}
