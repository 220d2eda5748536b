mod inmemory;
mod postgres;

pub use inmemory::InMemoryGarageRepo;
pub use postgres::PostgresGarageRepo;

use garagealert_domain::{Garage, ID};

#[async_trait::async_trait]
pub trait IGarageRepo: Send + Sync {
    async fn insert(&self, garage: &Garage) -> anyhow::Result<()>;
    async fn save(&self, garage: &Garage) -> anyhow::Result<()>;
    async fn find(&self, garage_id: &ID) -> Option<Garage>;
    async fn find_by_apikey(&self, api_key: &str) -> Option<Garage>;
    /// Garages taking part in reminder generation (trialing or active)
    async fn find_eligible_for_reminders(&self) -> anyhow::Result<Vec<Garage>>;
}
