use crate::dtos::VehicleDTO;
use chrono::NaiveDate;
use garagealert_domain::{Vehicle, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub vehicle: VehicleDTO,
}

impl VehicleResponse {
    pub fn new(vehicle: &Vehicle) -> Self {
        Self {
            vehicle: VehicleDTO::new(vehicle),
        }
    }
}

pub mod create_vehicle {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub customer_id: ID,
        pub registration: String,
        pub make: Option<String>,
        pub model: Option<String>,
        pub mot_due_date: Option<NaiveDate>,
        pub next_service_date: Option<NaiveDate>,
        pub tyre_check_due_date: Option<NaiveDate>,
        pub repair_followup_date: Option<NaiveDate>,
    }

    pub type APIResponse = VehicleResponse;
}

pub mod update_vehicle {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub vehicle_id: ID,
    }

    /// Only provided fields change; the four due dates can be cleared by
    /// sending an explicit null inside a provided value.
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub registration: Option<String>,
        pub make: Option<String>,
        pub model: Option<String>,
        pub mot_due_date: Option<Option<NaiveDate>>,
        pub next_service_date: Option<Option<NaiveDate>>,
        pub tyre_check_due_date: Option<Option<NaiveDate>>,
        pub repair_followup_date: Option<Option<NaiveDate>>,
        pub mot_reminder_enabled: Option<bool>,
        pub service_reminder_enabled: Option<bool>,
        pub tyre_reminder_enabled: Option<bool>,
        pub repair_reminder_enabled: Option<bool>,
    }

    pub type APIResponse = VehicleResponse;
}

pub mod get_vehicles {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub vehicles: Vec<VehicleDTO>,
    }

    impl APIResponse {
        pub fn new(vehicles: &[Vehicle]) -> Self {
            Self {
                vehicles: vehicles.iter().map(VehicleDTO::new).collect(),
            }
        }
    }
}
