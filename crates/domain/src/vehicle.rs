use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A customer vehicle with the due dates the reminder pipeline watches.
/// A vehicle belongs to exactly one customer and one garage (the same
/// garage as its customer).
#[derive(Debug, Clone)]
pub struct Vehicle {
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

/// Category of due date being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Mot,
    Service,
    Tyre,
    Repair,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mot => "mot",
            Self::Service => "service",
            Self::Tyre => "tyre",
            Self::Repair => "repair",
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mot" => Ok(Self::Mot),
            "service" => Ok(Self::Service),
            "tyre" => Ok(Self::Tyre),
            "repair" => Ok(Self::Repair),
            _ => Err(anyhow::anyhow!("Unknown reminder type: {}", s)),
        }
    }
}

impl Vehicle {
    pub fn new(customer_id: ID, garage_id: ID, registration: String) -> Self {
        Self {
            id: Default::default(),
            customer_id,
            garage_id,
            registration,
            make: None,
            model: None,
            mot_due_date: None,
            next_service_date: None,
            tyre_check_due_date: None,
            repair_followup_date: None,
            mot_reminder_enabled: true,
            service_reminder_enabled: true,
            tyre_reminder_enabled: true,
            repair_reminder_enabled: true,
        }
    }

    /// The date field a reminder of the given type tracks
    pub fn due_date_for(&self, reminder_type: ReminderType) -> Option<NaiveDate> {
        match reminder_type {
            ReminderType::Mot => self.mot_due_date,
            ReminderType::Service => self.next_service_date,
            ReminderType::Tyre => self.tyre_check_due_date,
            ReminderType::Repair => self.repair_followup_date,
        }
    }

    /// Whether the owner enabled reminders of the given type for this vehicle
    pub fn reminder_enabled_for(&self, reminder_type: ReminderType) -> bool {
        match reminder_type {
            ReminderType::Mot => self.mot_reminder_enabled,
            ReminderType::Service => self.service_reminder_enabled,
            ReminderType::Tyre => self.tyre_reminder_enabled,
            ReminderType::Repair => self.repair_reminder_enabled,
        }
    }
}

impl Entity for Vehicle {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Formats a UK registration for display, e.g. `AB12CDE` -> `AB12 CDE`.
pub fn format_registration(reg: &str) -> String {
    let cleaned: String = reg
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if cleaned.len() == 7 {
        format!("{} {}", &cleaned[..4], &cleaned[4..])
    } else {
        cleaned
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn due_date_and_flag_follow_reminder_type() {
        let mut vehicle = Vehicle::new(Default::default(), Default::default(), "AB12CDE".into());
        vehicle.mot_due_date = NaiveDate::from_ymd_opt(2026, 2, 12);
        vehicle.next_service_date = NaiveDate::from_ymd_opt(2026, 6, 1);
        vehicle.tyre_reminder_enabled = false;

        assert_eq!(
            vehicle.due_date_for(ReminderType::Mot),
            NaiveDate::from_ymd_opt(2026, 2, 12)
        );
        assert_eq!(
            vehicle.due_date_for(ReminderType::Service),
            NaiveDate::from_ymd_opt(2026, 6, 1)
        );
        assert_eq!(vehicle.due_date_for(ReminderType::Tyre), None);
        assert_eq!(vehicle.due_date_for(ReminderType::Repair), None);

        assert!(vehicle.reminder_enabled_for(ReminderType::Mot));
        assert!(!vehicle.reminder_enabled_for(ReminderType::Tyre));
    }

    #[test]
    fn it_formats_registrations() {
        assert_eq!(format_registration("AB12CDE"), "AB12 CDE");
        assert_eq!(format_registration("ab12 cde"), "AB12 CDE");
        assert_eq!(format_registration("A1"), "A1");
    }
}
