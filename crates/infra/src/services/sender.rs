use garagealert_domain::Channel;
use std::sync::Mutex;

/// Outcome of one provider send attempt. Provider failures come back as
/// values, never as errors across this boundary, so a bad recipient or a
/// provider outage can only ever fail its own message.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub success: bool,
    pub provider_message_id: Option<String>,
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn delivered(provider_message_id: Option<String>) -> Self {
        Self {
            success: true,
            provider_message_id,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(error: S) -> Self {
        Self {
            success: false,
            provider_message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Uniform send contract over the three channel providers. Callers cannot
/// tell a real provider from a test double.
#[async_trait::async_trait]
pub trait IChannelSender: Send + Sync {
    /// `subject` only applies to email and is ignored elsewhere
    async fn send(
        &self,
        channel: Channel,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> SendOutcome;
}

/// Message captured by the stub sender in tests.
#[derive(Debug, Clone)]
pub struct StubSentMessage {
    pub channel: Channel,
    pub recipient: String,
    pub subject: Option<String>,
    pub body: String,
}

/// Test double for the channel providers: records every send and can be
/// scripted to fail. Lives next to the real sender the same way the
/// in-memory repos live next to the postgres ones.
pub struct StubChannelSender {
    pub sent: Mutex<Vec<StubSentMessage>>,
    fail_with: Option<String>,
}

impl StubChannelSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    /// A sender where every send fails with the given provider error
    pub fn failing<S: Into<String>>(error: S) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(error.into()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent_messages(&self) -> Vec<StubSentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for StubChannelSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IChannelSender for StubChannelSender {
    async fn send(
        &self,
        channel: Channel,
        recipient: &str,
        subject: Option<&str>,
        body: &str,
    ) -> SendOutcome {
        let mut sent = self.sent.lock().unwrap();
        sent.push(StubSentMessage {
            channel,
            recipient: recipient.to_string(),
            subject: subject.map(|s| s.to_string()),
            body: body.to_string(),
        });
        match &self.fail_with {
            Some(error) => SendOutcome::failed(error.clone()),
            None => SendOutcome::delivered(Some(format!("stub-{}", sent.len()))),
        }
    }
}
