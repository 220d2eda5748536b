use super::IConsentRecordRepo;
use crate::repos::shared::inmemory_repo::*;
use garagealert_domain::{Channel, ConsentRecord, ID};

pub struct InMemoryConsentRecordRepo {
    records: std::sync::Mutex<Vec<ConsentRecord>>,
}

impl InMemoryConsentRecordRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IConsentRecordRepo for InMemoryConsentRecordRepo {
    async fn insert(&self, record: &ConsentRecord) -> anyhow::Result<()> {
        insert(record, &self.records);
        Ok(())
    }

    async fn find_latest(&self, customer_id: &ID, channel: Channel) -> Option<ConsentRecord> {
        let mut records = find_by(&self.records, |r| {
            r.customer_id == *customer_id && r.channel == channel
        });
        // Stable sort keeps insertion order for equal timestamps, so the
        // most recently appended record wins ties
        records.sort_by_key(|r| r.collected_at);
        records.pop()
    }

    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<ConsentRecord>> {
        let mut records = find_by(&self.records, |r| r.customer_id == *customer_id);
        records.sort_by(|a, b| b.collected_at.cmp(&a.collected_at));
        Ok(records)
    }
}
