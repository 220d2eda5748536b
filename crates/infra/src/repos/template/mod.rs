mod inmemory;
mod postgres;

pub use inmemory::InMemoryMessageTemplateRepo;
pub use postgres::PostgresMessageTemplateRepo;

use garagealert_domain::{Channel, MessageTemplate, ReminderType, ID};

#[async_trait::async_trait]
pub trait IMessageTemplateRepo: Send + Sync {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<MessageTemplate>;
    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<MessageTemplate>>;
    /// The template the scheduler resolves for a reminder, if the garage
    /// configured one for the (type, channel) pair
    async fn find_by_type_and_channel(
        &self,
        garage_id: &ID,
        reminder_type: ReminderType,
        channel: Channel,
    ) -> Option<MessageTemplate>;
}
