use super::IScheduledReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use garagealert_domain::{ReminderStatus, ScheduledReminder, ID};

pub struct InMemoryScheduledReminderRepo {
    reminders: std::sync::Mutex<Vec<ScheduledReminder>>,
}

impl InMemoryScheduledReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledReminderRepo for InMemoryScheduledReminderRepo {
    async fn insert_if_absent(&self, reminder: &ScheduledReminder) -> anyhow::Result<bool> {
        let mut reminders = self.reminders.lock().unwrap();
        let exists = reminders.iter().any(|r| {
            r.vehicle_id == reminder.vehicle_id
                && r.reminder_type == reminder.reminder_type
                && r.scheduled_for == reminder.scheduled_for
        });
        if exists {
            return Ok(false);
        }
        reminders.push(reminder.clone());
        Ok(true)
    }

    async fn save(&self, reminder: &ScheduledReminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ScheduledReminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_pending_by_date(
        &self,
        scheduled_for: NaiveDate,
        limit: i64,
    ) -> anyhow::Result<Vec<ScheduledReminder>> {
        let mut pending = find_by(&self.reminders, |r| {
            r.scheduled_for == scheduled_for && r.status == ReminderStatus::Pending
        });
        pending.truncate(limit as usize);
        Ok(pending)
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<ScheduledReminder>> {
        Ok(find_by(&self.reminders, |r| r.garage_id == *garage_id))
    }

    async fn reclaim_stuck_sending(
        &self,
        before: NaiveDate,
        error_message: &str,
    ) -> anyhow::Result<i64> {
        let reclaimed = update_many(
            &self.reminders,
            |r| r.status == ReminderStatus::Sending && r.scheduled_for < before,
            |r| {
                r.status = ReminderStatus::Failed;
                r.error_message = Some(error_message.to_string());
            },
        );
        Ok(reclaimed as i64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use garagealert_domain::{Channel, ReminderType};

    fn reminder_on(scheduled_for: NaiveDate) -> ScheduledReminder {
        ScheduledReminder::new(
            Default::default(),
            Default::default(),
            Default::default(),
            ReminderType::Mot,
            Channel::Sms,
            None,
            scheduled_for,
            Some(30),
        )
    }

    #[tokio::test]
    async fn insert_if_absent_dedups_on_vehicle_type_and_date() {
        let repo = InMemoryScheduledReminderRepo::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        let reminder = reminder_on(date);

        assert!(repo.insert_if_absent(&reminder).await.unwrap());

        // Same vehicle/type/date under a fresh id is a no-op
        let mut duplicate = reminder.clone();
        duplicate.id = Default::default();
        assert!(!repo.insert_if_absent(&duplicate).await.unwrap());

        // A different date for the same vehicle/type is a new row
        let mut next_day = reminder;
        next_day.id = Default::default();
        next_day.scheduled_for = date.succ();
        assert!(repo.insert_if_absent(&next_day).await.unwrap());
    }

    #[tokio::test]
    async fn reclaim_only_touches_stuck_sending_rows() {
        let repo = InMemoryScheduledReminderRepo::new();
        let yesterday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let today = yesterday.succ();

        let mut stuck = reminder_on(yesterday);
        stuck.mark_sending();
        repo.insert_if_absent(&stuck).await.unwrap();

        let mut todays = reminder_on(today);
        todays.mark_sending();
        repo.insert_if_absent(&todays).await.unwrap();

        let reclaimed = repo.reclaim_stuck_sending(today, "interrupted").await.unwrap();
        assert_eq!(reclaimed, 1);

        let stuck = repo.find(&stuck.id).await.unwrap();
        assert_eq!(stuck.status, ReminderStatus::Failed);
        assert_eq!(stuck.error_message.as_deref(), Some("interrupted"));

        let todays = repo.find(&todays.id).await.unwrap();
        assert_eq!(todays.status, ReminderStatus::Sending);
    }
}
