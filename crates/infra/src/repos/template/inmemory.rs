use super::IMessageTemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use garagealert_domain::{Channel, MessageTemplate, ReminderType, ID};

pub struct InMemoryMessageTemplateRepo {
    templates: std::sync::Mutex<Vec<MessageTemplate>>,
}

impl InMemoryMessageTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMessageTemplateRepo for InMemoryMessageTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        insert(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        find(template_id, &self.templates)
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<MessageTemplate>> {
        Ok(find_by(&self.templates, |t| t.garage_id == *garage_id))
    }

    async fn find_by_type_and_channel(
        &self,
        garage_id: &ID,
        reminder_type: ReminderType,
        channel: Channel,
    ) -> Option<MessageTemplate> {
        find_by(&self.templates, |t| {
            t.garage_id == *garage_id && t.reminder_type == reminder_type && t.channel == channel
        })
        .into_iter()
        .next()
    }
}
