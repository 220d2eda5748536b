use crate::customer::Channel;
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Append-only audit trail entry: one row per actual send attempt,
/// successes and failures alike, with the rendered content that went (or
/// failed to go) out.
#[derive(Debug, Clone)]
pub struct MessageLog {
    pub id: ID,
    pub garage_id: ID,
    pub customer_id: Option<ID>,
    pub vehicle_id: Option<ID>,
    pub scheduled_reminder_id: Option<ID>,
    pub channel: Channel,
    pub recipient: String,
    pub template_id: Option<ID>,
    pub subject: Option<String>,
    pub body: String,
    pub status: DeliveryStatus,
    pub provider_message_id: Option<String>,
    pub error_message: Option<String>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Failed,
    Bounced,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Bounced => "bounced",
        }
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "delivered" => Ok(Self::Delivered),
            "failed" => Ok(Self::Failed),
            "bounced" => Ok(Self::Bounced),
            _ => Err(anyhow::anyhow!("Unknown delivery status: {}", s)),
        }
    }
}

impl Entity for MessageLog {
    fn id(&self) -> &ID {
        &self.id
    }
}
