use super::IVehicleRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::NaiveDate;
use garagealert_domain::{ReminderType, Vehicle, ID};

pub struct InMemoryVehicleRepo {
    vehicles: std::sync::Mutex<Vec<Vehicle>>,
}

impl InMemoryVehicleRepo {
    pub fn new() -> Self {
        Self {
            vehicles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IVehicleRepo for InMemoryVehicleRepo {
    async fn insert(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        insert(vehicle, &self.vehicles);
        Ok(())
    }

    async fn save(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        save(vehicle, &self.vehicles);
        Ok(())
    }

    async fn find(&self, vehicle_id: &ID) -> Option<Vehicle> {
        find(vehicle_id, &self.vehicles)
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<Vehicle>> {
        Ok(find_by(&self.vehicles, |v| v.garage_id == *garage_id))
    }

    async fn find_due(
        &self,
        garage_id: &ID,
        reminder_type: ReminderType,
        due_date: NaiveDate,
    ) -> anyhow::Result<Vec<Vehicle>> {
        Ok(find_by(&self.vehicles, |v| {
            v.garage_id == *garage_id
                && v.due_date_for(reminder_type) == Some(due_date)
                && v.reminder_enabled_for(reminder_type)
        }))
    }
}
