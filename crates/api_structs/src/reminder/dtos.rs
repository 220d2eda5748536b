use chrono::{DateTime, NaiveDate, Utc};
use garagealert_domain::{Channel, ReminderStatus, ReminderType, ScheduledReminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminderDTO {
    pub id: ID,
    pub garage_id: ID,
    pub customer_id: ID,
    pub vehicle_id: ID,
    pub reminder_type: ReminderType,
    pub channel: Channel,
    pub template_id: Option<ID>,
    pub scheduled_for: NaiveDate,
    pub days_before_due: Option<i64>,
    pub status: ReminderStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl ScheduledReminderDTO {
    pub fn new(reminder: &ScheduledReminder) -> Self {
        Self {
            id: reminder.id.clone(),
            garage_id: reminder.garage_id.clone(),
            customer_id: reminder.customer_id.clone(),
            vehicle_id: reminder.vehicle_id.clone(),
            reminder_type: reminder.reminder_type,
            channel: reminder.channel,
            template_id: reminder.template_id.clone(),
            scheduled_for: reminder.scheduled_for,
            days_before_due: reminder.days_before_due,
            status: reminder.status,
            sent_at: reminder.sent_at,
            error_message: reminder.error_message.clone(),
        }
    }
}
