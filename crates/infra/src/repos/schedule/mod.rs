mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderScheduleRepo;
pub use postgres::PostgresReminderScheduleRepo;

use garagealert_domain::{ReminderSchedule, ID};

#[async_trait::async_trait]
pub trait IReminderScheduleRepo: Send + Sync {
    async fn insert(&self, schedule: &ReminderSchedule) -> anyhow::Result<()>;
    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>>;
    async fn find_enabled_by_garage(&self, garage_id: &ID)
        -> anyhow::Result<Vec<ReminderSchedule>>;
}
