use crate::dtos::GarageDTO;
use garagealert_domain::{Garage, SubscriptionStatus};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageResponse {
    pub garage: GarageDTO,
}

impl GarageResponse {
    pub fn new(garage: &Garage) -> Self {
        Self {
            garage: GarageDTO::new(garage),
        }
    }
}

pub mod create_garage {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub code: String,
        pub name: String,
        pub phone: Option<String>,
        pub email: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub garage: GarageDTO,
        pub secret_api_key: String,
    }

    impl APIResponse {
        pub fn new(garage: Garage) -> Self {
            Self {
                garage: GarageDTO::new(&garage),
                secret_api_key: garage.secret_api_key,
            }
        }
    }
}

pub mod get_garage {
    use super::*;

    pub type APIResponse = GarageResponse;
}

pub mod set_subscription_status {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub subscription_status: SubscriptionStatus,
    }

    pub type APIResponse = GarageResponse;
}
