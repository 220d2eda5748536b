use super::IMessageLogRepo;
use crate::repos::shared::inmemory_repo::*;
use garagealert_domain::{MessageLog, ID};

pub struct InMemoryMessageLogRepo {
    logs: std::sync::Mutex<Vec<MessageLog>>,
}

impl InMemoryMessageLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMessageLogRepo for InMemoryMessageLogRepo {
    async fn insert(&self, log: &MessageLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<MessageLog>> {
        let mut logs = find_by(&self.logs, |l| l.garage_id == *garage_id);
        logs.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        Ok(logs)
    }
}
