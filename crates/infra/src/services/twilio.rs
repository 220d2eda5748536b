use super::sender::SendOutcome;
use crate::config::TwilioConfig;
use garagealert_domain::format_uk_phone;
use serde::Deserialize;
use tracing::error;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Twilio REST client for sms and whatsapp. Both channels share the same
/// Messages endpoint; whatsapp routes are selected by prefixing the from
/// and to numbers.
pub struct TwilioClient {
    http: reqwest::Client,
    config: TwilioConfig,
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: Option<String>,
}

impl TwilioClient {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn send_sms(&self, to: &str, body: &str) -> SendOutcome {
        let to = format_uk_phone(to);
        self.send_message(self.config.sms_from.clone(), to, body)
            .await
    }

    pub async fn send_whatsapp(&self, to: &str, body: &str) -> SendOutcome {
        let to = format!("whatsapp:{}", format_uk_phone(to));
        let from = format!("whatsapp:{}", self.config.whatsapp_from);
        self.send_message(from, to, body).await
    }

    async fn send_message(&self, from: String, to: String, body: &str) -> SendOutcome {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.config.account_sid
        );
        let params = [("To", to.as_str()), ("From", from.as_str()), ("Body", body)];

        let res = match self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("Twilio request failed: {:?}", e);
                return SendOutcome::failed(e.to_string());
            }
        };

        if res.status().is_success() {
            match res.json::<TwilioMessageResponse>().await {
                Ok(message) => SendOutcome::delivered(Some(message.sid)),
                Err(e) => {
                    error!("Unable to parse Twilio response: {:?}", e);
                    SendOutcome::delivered(None)
                }
            }
        } else {
            let status = res.status();
            let message = res
                .json::<TwilioErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Twilio returned status {}", status));
            error!("Twilio send failed: {}", message);
            SendOutcome::failed(message)
        }
    }
}
