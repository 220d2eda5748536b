use super::IReminderScheduleRepo;
use crate::repos::shared::inmemory_repo::*;
use garagealert_domain::{ReminderSchedule, ID};

pub struct InMemoryReminderScheduleRepo {
    schedules: std::sync::Mutex<Vec<ReminderSchedule>>,
}

impl InMemoryReminderScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for InMemoryReminderScheduleRepo {
    async fn insert(&self, schedule: &ReminderSchedule) -> anyhow::Result<()> {
        insert(schedule, &self.schedules);
        Ok(())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        Ok(find_by(&self.schedules, |s| s.garage_id == *garage_id))
    }

    async fn find_enabled_by_garage(
        &self,
        garage_id: &ID,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        Ok(find_by(&self.schedules, |s| {
            s.garage_id == *garage_id && s.is_enabled
        }))
    }
}
