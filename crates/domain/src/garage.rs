use crate::shared::entity::{Entity, ID};
use garagealert_utils::create_random_secret;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const API_KEY_LEN: usize = 30;

/// A `Garage` is a tenant account. Every other resource belongs to exactly
/// one `Garage` and all queries against the store are scoped by its id, so
/// different garages can never see each other's data.
#[derive(Debug, Clone)]
pub struct Garage {
    pub id: ID,
    pub name: String,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Credential for the tenant CRUD surface
    pub secret_api_key: String,
    /// Mutated by the external billing collaborator, consumed by the
    /// reminder pipeline to decide eligibility
    pub subscription_status: SubscriptionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Trialing,
    Active,
    Cancelled,
    PastDue,
}

impl SubscriptionStatus {
    /// Only trialing and active garages take part in reminder generation
    pub fn is_eligible_for_reminders(&self) -> bool {
        matches!(self, Self::Trialing | Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trialing => "trialing",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::PastDue => "past_due",
        }
    }
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trialing" => Ok(Self::Trialing),
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "past_due" => Ok(Self::PastDue),
            _ => Err(anyhow::anyhow!("Unknown subscription status: {}", s)),
        }
    }
}

impl Garage {
    pub fn new(name: String) -> Self {
        Self {
            id: Default::default(),
            name,
            address_line_1: None,
            address_line_2: None,
            city: None,
            postcode: None,
            phone: None,
            email: None,
            secret_api_key: Self::generate_secret_api_key(),
            subscription_status: SubscriptionStatus::Trialing,
        }
    }

    pub fn generate_secret_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("sk_{}", rand_secret)
    }
}

impl Entity for Garage {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_garage_with_api_key_and_trial() {
        let garage = Garage::new("Speedy Motors".into());
        assert!(garage.secret_api_key.starts_with("sk_"));
        assert!(garage.secret_api_key.len() > API_KEY_LEN);
        assert_eq!(garage.subscription_status, SubscriptionStatus::Trialing);
    }

    #[test]
    fn eligibility_follows_subscription_status() {
        assert!(SubscriptionStatus::Trialing.is_eligible_for_reminders());
        assert!(SubscriptionStatus::Active.is_eligible_for_reminders());
        assert!(!SubscriptionStatus::Cancelled.is_eligible_for_reminders());
        assert!(!SubscriptionStatus::PastDue.is_eligible_for_reminders());
    }

    #[test]
    fn subscription_status_roundtrips_through_str() {
        for status in [
            SubscriptionStatus::Trialing,
            SubscriptionStatus::Active,
            SubscriptionStatus::Cancelled,
            SubscriptionStatus::PastDue,
        ]
        .iter()
        {
            assert_eq!(status.as_str().parse::<SubscriptionStatus>().unwrap(), *status);
        }
        assert!("paused".parse::<SubscriptionStatus>().is_err());
    }
}
