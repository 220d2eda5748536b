use garagealert_domain::{Garage, SubscriptionStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageDTO {
    pub id: ID,
    pub name: String,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub subscription_status: SubscriptionStatus,
}

impl GarageDTO {
    pub fn new(garage: &Garage) -> Self {
        Self {
            id: garage.id.clone(),
            name: garage.name.clone(),
            address_line_1: garage.address_line_1.clone(),
            address_line_2: garage.address_line_2.clone(),
            city: garage.city.clone(),
            postcode: garage.postcode.clone(),
            phone: garage.phone.clone(),
            email: garage.email.clone(),
            subscription_status: garage.subscription_status,
        }
    }
}
