use crate::customer::Channel;
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// One entry in a customer's per-channel consent history. The history is
/// append-only: consent changes add a new record, they never mutate an
/// existing one. The record with the latest `collected_at` for a
/// (customer, channel) pair is the current state.
#[derive(Debug, Clone)]
pub struct ConsentRecord {
    pub id: ID,
    pub customer_id: ID,
    pub channel: Channel,
    pub status: ConsentStatus,
    pub method: ConsentMethod,
    pub collected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    OptedIn,
    OptedOut,
}

impl ConsentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OptedIn => "opted_in",
            Self::OptedOut => "opted_out",
        }
    }
}

impl Display for ConsentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opted_in" => Ok(Self::OptedIn),
            "opted_out" => Ok(Self::OptedOut),
            _ => Err(anyhow::anyhow!("Unknown consent status: {}", s)),
        }
    }
}

/// How a consent record was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentMethod {
    StopKeyword,
    UnsubscribeLink,
    WebForm,
    Staff,
}

impl ConsentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StopKeyword => "stop_keyword",
            Self::UnsubscribeLink => "unsubscribe_link",
            Self::WebForm => "web_form",
            Self::Staff => "staff",
        }
    }
}

impl Display for ConsentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stop_keyword" => Ok(Self::StopKeyword),
            "unsubscribe_link" => Ok(Self::UnsubscribeLink),
            "web_form" => Ok(Self::WebForm),
            "staff" => Ok(Self::Staff),
            _ => Err(anyhow::anyhow!("Unknown consent method: {}", s)),
        }
    }
}

impl ConsentRecord {
    pub fn new(
        customer_id: ID,
        channel: Channel,
        status: ConsentStatus,
        method: ConsentMethod,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            customer_id,
            channel,
            status,
            method,
            collected_at,
        }
    }

    pub fn opt_out(
        customer_id: ID,
        channel: Channel,
        method: ConsentMethod,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self::new(customer_id, channel, ConsentStatus::OptedOut, method, collected_at)
    }

    pub fn opt_in(
        customer_id: ID,
        channel: Channel,
        method: ConsentMethod,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self::new(customer_id, channel, ConsentStatus::OptedIn, method, collected_at)
    }
}

impl Entity for ConsentRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The consent gate decision: opting out is explicit, so a customer with no
/// record at all for the channel is allowed. Only a latest record with
/// status opted_out blocks sending.
pub fn sending_allowed(latest: Option<&ConsentRecord>) -> bool {
    !matches!(latest.map(|r| r.status), Some(ConsentStatus::OptedOut))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn record_at(status: ConsentStatus, ts: i64) -> ConsentRecord {
        ConsentRecord::new(
            Default::default(),
            Channel::Sms,
            status,
            ConsentMethod::WebForm,
            Utc.timestamp(ts, 0),
        )
    }

    #[test]
    fn absence_of_records_means_allowed() {
        assert!(sending_allowed(None));
    }

    #[test]
    fn latest_opt_out_blocks() {
        let record = record_at(ConsentStatus::OptedOut, 100);
        assert!(!sending_allowed(Some(&record)));
    }

    #[test]
    fn re_opt_in_allows_again() {
        let record = record_at(ConsentStatus::OptedIn, 200);
        assert!(sending_allowed(Some(&record)));
    }
}
