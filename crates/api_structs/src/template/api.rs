use crate::dtos::MessageTemplateDTO;
use garagealert_domain::{Channel, MessageTemplate, ReminderType};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateResponse {
    pub template: MessageTemplateDTO,
}

impl MessageTemplateResponse {
    pub fn new(template: &MessageTemplate) -> Self {
        Self {
            template: MessageTemplateDTO::new(template),
        }
    }
}

pub mod create_template {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_type: ReminderType,
        pub channel: Channel,
        pub name: String,
        pub subject: Option<String>,
        pub body: String,
    }

    pub type APIResponse = MessageTemplateResponse;
}

pub mod get_templates {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub templates: Vec<MessageTemplateDTO>,
    }

    impl APIResponse {
        pub fn new(templates: &[MessageTemplate]) -> Self {
            Self {
                templates: templates.iter().map(MessageTemplateDTO::new).collect(),
            }
        }
    }
}
