use chrono::{DateTime, Utc};
use garagealert_domain::{Channel, ConsentMethod, ConsentRecord, ConsentStatus, Customer, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDTO {
    pub id: ID,
    pub garage_id: ID,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub preferred_channel: Channel,
    pub notes: Option<String>,
}

impl CustomerDTO {
    pub fn new(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            garage_id: customer.garage_id.clone(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            preferred_channel: customer.preferred_channel,
            notes: customer.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecordDTO {
    pub id: ID,
    pub customer_id: ID,
    pub channel: Channel,
    pub status: ConsentStatus,
    pub method: ConsentMethod,
    pub collected_at: DateTime<Utc>,
}

impl ConsentRecordDTO {
    pub fn new(record: &ConsentRecord) -> Self {
        Self {
            id: record.id.clone(),
            customer_id: record.customer_id.clone(),
            channel: record.channel,
            status: record.status,
            method: record.method,
            collected_at: record.collected_at,
        }
    }
}
