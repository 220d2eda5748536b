use garagealert_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret code required to create new `Garage`s
    pub create_garage_secret_code: String,
    /// Shared secret the external time-based trigger presents as a Bearer
    /// token when invoking the cron endpoints
    pub cron_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Public base url, used to build unsubscribe links in messages
    pub app_url: String,
    /// Twilio credentials for sms/whatsapp; sends on those channels fail
    /// with a normalized error when absent
    pub twilio: Option<TwilioConfig>,
    /// Postmark credentials for email; same failure behavior when absent
    pub postmark: Option<PostmarkConfig>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// E.164 sender number for sms
    pub sms_from: String,
    /// Sender number for whatsapp, without the `whatsapp:` prefix
    pub whatsapp_from: String,
}

#[derive(Debug, Clone)]
pub struct PostmarkConfig {
    pub server_token: String,
    pub from_email: String,
}

fn env_secret_or_generated(var: &str) -> String {
    match std::env::var(var) {
        Ok(secret) => secret,
        Err(_) => {
            info!("Did not find {} environment variable. Going to create one.", var);
            let secret = create_random_secret(16);
            info!("Secret for {} was generated and set to: {}", var, secret);
            secret
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let create_garage_secret_code = env_secret_or_generated("CREATE_GARAGE_SECRET_CODE");
        let cron_secret = env_secret_or_generated("CRON_SECRET");

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

        let twilio = match (
            std::env::var("TWILIO_ACCOUNT_SID"),
            std::env::var("TWILIO_AUTH_TOKEN"),
            std::env::var("TWILIO_PHONE_NUMBER"),
            std::env::var("TWILIO_WHATSAPP_NUMBER"),
        ) {
            (Ok(account_sid), Ok(auth_token), Ok(sms_from), Ok(whatsapp_from)) => {
                Some(TwilioConfig {
                    account_sid,
                    auth_token,
                    sms_from,
                    whatsapp_from,
                })
            }
            _ => {
                warn!("Twilio environment variables are not set. sms and whatsapp sends will fail.");
                None
            }
        };

        let postmark = match (
            std::env::var("POSTMARK_SERVER_TOKEN"),
            std::env::var("POSTMARK_FROM_EMAIL"),
        ) {
            (Ok(server_token), Ok(from_email)) => Some(PostmarkConfig {
                server_token,
                from_email,
            }),
            _ => {
                warn!("Postmark environment variables are not set. email sends will fail.");
                None
            }
        };

        Self {
            create_garage_secret_code,
            cron_secret,
            port,
            app_url,
            twilio,
            postmark,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
