use garagealert_domain::{ReminderSchedule, ReminderType, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderScheduleDTO {
    pub id: ID,
    pub garage_id: ID,
    pub reminder_type: ReminderType,
    pub days_before: i64,
    pub is_enabled: bool,
}

impl ReminderScheduleDTO {
    pub fn new(schedule: &ReminderSchedule) -> Self {
        Self {
            id: schedule.id.clone(),
            garage_id: schedule.garage_id.clone(),
            reminder_type: schedule.reminder_type,
            days_before: schedule.days_before,
            is_enabled: schedule.is_enabled,
        }
    }
}
