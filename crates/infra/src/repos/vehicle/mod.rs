mod inmemory;
mod postgres;

pub use inmemory::InMemoryVehicleRepo;
pub use postgres::PostgresVehicleRepo;

use chrono::NaiveDate;
use garagealert_domain::{ReminderType, Vehicle, ID};

#[async_trait::async_trait]
pub trait IVehicleRepo: Send + Sync {
    async fn insert(&self, vehicle: &Vehicle) -> anyhow::Result<()>;
    async fn save(&self, vehicle: &Vehicle) -> anyhow::Result<()>;
    async fn find(&self, vehicle_id: &ID) -> Option<Vehicle>;
    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<Vehicle>>;
    /// Vehicles under the garage whose date field for `reminder_type`
    /// equals `due_date` exactly and whose reminder flag for that type is
    /// on. An exact-match query, never a range.
    async fn find_due(
        &self,
        garage_id: &ID,
        reminder_type: ReminderType,
        due_date: NaiveDate,
    ) -> anyhow::Result<Vec<Vehicle>>;
}
