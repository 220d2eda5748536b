use chrono::{DateTime, Utc};
use garagealert_domain::{Channel, DeliveryStatus, MessageLog, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageLogDTO {
    pub id: ID,
    pub garage_id: ID,
    pub customer_id: Option<ID>,
    pub vehicle_id: Option<ID>,
    pub scheduled_reminder_id: Option<ID>,
    pub channel: Channel,
    pub recipient: String,
    pub template_id: Option<ID>,
    pub subject: Option<String>,
    pub body: String,
    pub status: DeliveryStatus,
    pub provider_message_id: Option<String>,
    pub error_message: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl MessageLogDTO {
    pub fn new(log: &MessageLog) -> Self {
        Self {
            id: log.id.clone(),
            garage_id: log.garage_id.clone(),
            customer_id: log.customer_id.clone(),
            vehicle_id: log.vehicle_id.clone(),
            scheduled_reminder_id: log.scheduled_reminder_id.clone(),
            channel: log.channel,
            recipient: log.recipient.clone(),
            template_id: log.template_id.clone(),
            subject: log.subject.clone(),
            body: log.body.clone(),
            status: log.status,
            provider_message_id: log.provider_message_id.clone(),
            error_message: log.error_message.clone(),
            sent_at: log.sent_at,
        }
    }
}
