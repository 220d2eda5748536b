mod inmemory;
mod postgres;

pub use inmemory::InMemoryCustomerRepo;
pub use postgres::PostgresCustomerRepo;

use garagealert_domain::{Customer, ID};

#[async_trait::async_trait]
pub trait ICustomerRepo: Send + Sync {
    async fn insert(&self, customer: &Customer) -> anyhow::Result<()>;
    async fn save(&self, customer: &Customer) -> anyhow::Result<()>;
    async fn find(&self, customer_id: &ID) -> Option<Customer>;
    async fn find_many(&self, customer_ids: &[ID]) -> anyhow::Result<Vec<Customer>>;
    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<Customer>>;
    /// Phone lookup for the inbound STOP webhook. Deliberately unscoped:
    /// the sender's tenant is unknown at that point.
    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Vec<Customer>>;
}
