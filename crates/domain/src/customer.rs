use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A customer of a garage, the recipient of reminder messages.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: ID,
    pub garage_id: ID,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub preferred_channel: Channel,
    pub notes: Option<String>,
}

/// Delivery medium for outbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Whatsapp,
    Email,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Whatsapp => "whatsapp",
            Self::Email => "email",
        }
    }

    /// All supported channels, used when opting a customer out everywhere
    pub fn all() -> [Channel; 3] {
        [Self::Sms, Self::Whatsapp, Self::Email]
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Self::Sms),
            "whatsapp" => Ok(Self::Whatsapp),
            "email" => Ok(Self::Email),
            _ => Err(anyhow::anyhow!("Unknown channel: {}", s)),
        }
    }
}

impl Customer {
    pub fn new(garage_id: ID, first_name: String, last_name: String) -> Self {
        Self {
            id: Default::default(),
            garage_id,
            first_name,
            last_name,
            phone: None,
            email: None,
            preferred_channel: Channel::Sms,
            notes: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The contact detail a send on `channel` would go to, if the customer
    /// has one on file.
    pub fn contact_for_channel(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Sms | Channel::Whatsapp => self.phone.as_deref(),
            Channel::Email => self.email.as_deref(),
        }
    }
}

impl Entity for Customer {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn customer() -> Customer {
        let mut customer = Customer::new(Default::default(), "Jane".into(), "Doe".into());
        customer.phone = Some("07700 900000".into());
        customer
    }

    #[test]
    fn contact_follows_channel() {
        let customer = customer();
        assert_eq!(
            customer.contact_for_channel(Channel::Sms),
            Some("07700 900000")
        );
        assert_eq!(
            customer.contact_for_channel(Channel::Whatsapp),
            Some("07700 900000")
        );
        assert_eq!(customer.contact_for_channel(Channel::Email), None);
    }

    #[test]
    fn channel_roundtrips_through_str() {
        for channel in Channel::all().iter() {
            assert_eq!(channel.as_str().parse::<Channel>().unwrap(), *channel);
        }
        assert!("pigeon".parse::<Channel>().is_err());
    }
}
