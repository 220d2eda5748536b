mod inmemory;
mod postgres;

pub use inmemory::InMemoryConsentRecordRepo;
pub use postgres::PostgresConsentRecordRepo;

use garagealert_domain::{Channel, ConsentRecord, ID};

/// Consent history is append-only: there is insert and read, never update
/// or delete.
#[async_trait::async_trait]
pub trait IConsentRecordRepo: Send + Sync {
    async fn insert(&self, record: &ConsentRecord) -> anyhow::Result<()>;
    /// The record with the latest collected_at for (customer, channel),
    /// which decides the current consent state
    async fn find_latest(&self, customer_id: &ID, channel: Channel) -> Option<ConsentRecord>;
    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<ConsentRecord>>;
}
