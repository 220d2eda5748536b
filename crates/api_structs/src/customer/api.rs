use crate::dtos::{ConsentRecordDTO, CustomerDTO};
use garagealert_domain::{Channel, ConsentStatus, Customer, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub customer: CustomerDTO,
}

impl CustomerResponse {
    pub fn new(customer: &Customer) -> Self {
        Self {
            customer: CustomerDTO::new(customer),
        }
    }
}

pub mod create_customer {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub first_name: String,
        pub last_name: String,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub preferred_channel: Channel,
        pub notes: Option<String>,
    }

    pub type APIResponse = CustomerResponse;
}

pub mod get_customers {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub customers: Vec<CustomerDTO>,
    }

    impl APIResponse {
        pub fn new(customers: &[Customer]) -> Self {
            Self {
                customers: customers.iter().map(CustomerDTO::new).collect(),
            }
        }
    }
}

pub mod record_consent {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub customer_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub channel: Channel,
        pub status: ConsentStatus,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub consent: ConsentRecordDTO,
    }
}

pub mod get_consents {
    use super::*;
    use garagealert_domain::ConsentRecord;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub customer_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub consents: Vec<ConsentRecordDTO>,
    }

    impl APIResponse {
        pub fn new(consents: &[ConsentRecord]) -> Self {
            Self {
                consents: consents.iter().map(ConsentRecordDTO::new).collect(),
            }
        }
    }
}

pub mod unsubscribe_customer {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub customer_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}
