use garagealert_domain::{Channel, MessageTemplate, ReminderType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateDTO {
    pub id: ID,
    pub garage_id: ID,
    pub reminder_type: ReminderType,
    pub channel: Channel,
    pub name: String,
    pub subject: Option<String>,
    pub body: String,
}

impl MessageTemplateDTO {
    pub fn new(template: &MessageTemplate) -> Self {
        Self {
            id: template.id.clone(),
            garage_id: template.garage_id.clone(),
            reminder_type: template.reminder_type,
            channel: template.channel,
            name: template.name.clone(),
            subject: template.subject.clone(),
            body: template.body.clone(),
        }
    }
}
