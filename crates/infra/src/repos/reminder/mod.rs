mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduledReminderRepo;
pub use postgres::PostgresScheduledReminderRepo;

use chrono::NaiveDate;
use garagealert_domain::{ScheduledReminder, ID};

#[async_trait::async_trait]
pub trait IScheduledReminderRepo: Send + Sync {
    /// Inserts unless a reminder for the same (vehicle, type, scheduled_for)
    /// already exists. Returns whether a row was created. This no-op-on-
    /// conflict is what makes repeated generation runs idempotent.
    async fn insert_if_absent(&self, reminder: &ScheduledReminder) -> anyhow::Result<bool>;
    async fn save(&self, reminder: &ScheduledReminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<ScheduledReminder>;
    /// The dispatch batch: pending reminders scheduled for the given date,
    /// capped so one run stays inside its execution window
    async fn find_pending_by_date(
        &self,
        scheduled_for: NaiveDate,
        limit: i64,
    ) -> anyhow::Result<Vec<ScheduledReminder>>;
    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<ScheduledReminder>>;
    /// Fails `sending` rows left behind by an interrupted run on an earlier
    /// date. Returns how many were reclaimed.
    async fn reclaim_stuck_sending(
        &self,
        before: NaiveDate,
        error_message: &str,
    ) -> anyhow::Result<i64>;
}
