use crate::dtos::ScheduledReminderDTO;
use chrono::NaiveDate;
use garagealert_domain::{ReminderStatus, ScheduledReminder};
use serde::{Deserialize, Serialize};

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub status: Option<ReminderStatus>,
        pub scheduled_for: Option<NaiveDate>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ScheduledReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: &[ScheduledReminder]) -> Self {
            Self {
                reminders: reminders.iter().map(ScheduledReminderDTO::new).collect(),
            }
        }
    }
}

pub mod generate_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub date: NaiveDate,
        pub created: usize,
    }
}

pub mod dispatch_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub sent: usize,
        pub failed: usize,
        pub total: usize,
        pub reclaimed: usize,
        pub date: NaiveDate,
    }
}
