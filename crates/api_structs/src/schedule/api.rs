use crate::dtos::ReminderScheduleDTO;
use garagealert_domain::{ReminderSchedule, ReminderType};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderScheduleResponse {
    pub schedule: ReminderScheduleDTO,
}

impl ReminderScheduleResponse {
    pub fn new(schedule: &ReminderSchedule) -> Self {
        Self {
            schedule: ReminderScheduleDTO::new(schedule),
        }
    }
}

pub mod create_schedule {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_type: ReminderType,
        pub days_before: i64,
        pub is_enabled: Option<bool>,
    }

    pub type APIResponse = ReminderScheduleResponse;
}

pub mod get_schedules {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub schedules: Vec<ReminderScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(schedules: &[ReminderSchedule]) -> Self {
            Self {
                schedules: schedules.iter().map(ReminderScheduleDTO::new).collect(),
            }
        }
    }
}
