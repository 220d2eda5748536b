mod inmemory;
mod postgres;

pub use inmemory::InMemoryMessageLogRepo;
pub use postgres::PostgresMessageLogRepo;

use garagealert_domain::{MessageLog, ID};

/// The message log is an append-only audit trail: insert and read only.
#[async_trait::async_trait]
pub trait IMessageLogRepo: Send + Sync {
    async fn insert(&self, log: &MessageLog) -> anyhow::Result<()>;
    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<MessageLog>>;
}
