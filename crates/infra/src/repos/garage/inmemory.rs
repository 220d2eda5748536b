use super::IGarageRepo;
use crate::repos::shared::inmemory_repo::*;
use garagealert_domain::{Garage, ID};

pub struct InMemoryGarageRepo {
    garages: std::sync::Mutex<Vec<Garage>>,
}

impl InMemoryGarageRepo {
    pub fn new() -> Self {
        Self {
            garages: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IGarageRepo for InMemoryGarageRepo {
    async fn insert(&self, garage: &Garage) -> anyhow::Result<()> {
        insert(garage, &self.garages);
        Ok(())
    }

    async fn save(&self, garage: &Garage) -> anyhow::Result<()> {
        save(garage, &self.garages);
        Ok(())
    }

    async fn find(&self, garage_id: &ID) -> Option<Garage> {
        find(garage_id, &self.garages)
    }

    async fn find_by_apikey(&self, api_key: &str) -> Option<Garage> {
        find_by(&self.garages, |garage| garage.secret_api_key == api_key)
            .into_iter()
            .next()
    }

    async fn find_eligible_for_reminders(&self) -> anyhow::Result<Vec<Garage>> {
        Ok(find_by(&self.garages, |garage| {
            garage.subscription_status.is_eligible_for_reminders()
        }))
    }
}
