use crate::dtos::MessageLogDTO;
use garagealert_domain::{Channel, MessageLog, ID};
use serde::{Deserialize, Serialize};

pub mod get_messages {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub messages: Vec<MessageLogDTO>,
    }

    impl APIResponse {
        pub fn new(messages: &[MessageLog]) -> Self {
            Self {
                messages: messages.iter().map(MessageLogDTO::new).collect(),
            }
        }
    }
}

pub mod send_message {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub customer_id: ID,
        pub channel: Channel,
        pub subject: Option<String>,
        pub body: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub provider_message_id: Option<String>,
        pub error: Option<String>,
    }
}

pub mod receive_inbound_message {
    use super::*;

    /// Twilio posts inbound messages as form data with capitalized keys.
    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(rename = "From")]
        pub from: String,
        #[serde(rename = "Body", default)]
        pub body: String,
    }
}
