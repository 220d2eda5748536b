mod postmark;
mod sender;
mod twilio;

pub use postmark::PostmarkClient;
pub use sender::{IChannelSender, SendOutcome, StubChannelSender, StubSentMessage};
pub use twilio::TwilioClient;

use crate::config::{PostmarkConfig, TwilioConfig};
use garagealert_domain::Channel;

/// The production sender: routes each channel to its configured provider.
/// A channel with no configured provider fails with a normalized outcome
/// instead of panicking, so one missing credential never takes the whole
/// dispatch run down.
pub struct ProviderChannelSender {
    twilio: Option<TwilioClient>,
    postmark: Option<PostmarkClient>,
}

impl ProviderChannelSender {
    pub fn new(twilio: Option<TwilioConfig>, postmark: Option<PostmarkConfig>) -> Self {
        Self {
            twilio: twilio.map(TwilioClient::new),
            postmark: postmark.map(PostmarkClient::new),
        }
    }
}

#[async_trait::async_trait]
impl IChannelSender for ProviderChannelSender {
    async fn send(
        &self,
        channel: Channel,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> SendOutcome {
        match channel {
            Channel::Sms => match &self.twilio {
                Some(twilio) => twilio.send_sms(recipient, body).await,
                None => SendOutcome::failed("SMS provider is not configured"),
            },
            Channel::Whatsapp => match &self.twilio {
                Some(twilio) => twilio.send_whatsapp(recipient, body).await,
                None => SendOutcome::failed("WhatsApp provider is not configured"),
            },
            Channel::Email => match &self.postmark {
                Some(postmark) => {
                    postmark
                        .send_email(recipient, subject.unwrap_or("Reminder"), body)
                        .await
                }
                None => SendOutcome::failed("Email provider is not configured"),
            },
        }
    }
}
