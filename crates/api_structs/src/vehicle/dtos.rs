use chrono::NaiveDate;
use garagealert_domain::{Vehicle, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDTO {
    pub id: ID,
    pub customer_id: ID,
    pub garage_id: ID,
    pub registration: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mot_due_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub tyre_check_due_date: Option<NaiveDate>,
    pub repair_followup_date: Option<NaiveDate>,
    pub mot_reminder_enabled: bool,
    pub service_reminder_enabled: bool,
    pub tyre_reminder_enabled: bool,
    pub repair_reminder_enabled: bool,
}

impl VehicleDTO {
    pub fn new(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            customer_id: vehicle.customer_id.clone(),
            garage_id: vehicle.garage_id.clone(),
            registration: vehicle.registration.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            mot_due_date: vehicle.mot_due_date,
            next_service_date: vehicle.next_service_date,
            tyre_check_due_date: vehicle.tyre_check_due_date,
            repair_followup_date: vehicle.repair_followup_date,
            mot_reminder_enabled: vehicle.mot_reminder_enabled,
            service_reminder_enabled: vehicle.service_reminder_enabled,
            tyre_reminder_enabled: vehicle.tyre_reminder_enabled,
            repair_reminder_enabled: vehicle.repair_reminder_enabled,
        }
    }
}
