use crate::shared::entity::{Entity, ID};
use crate::vehicle::ReminderType;
use chrono::{Duration, NaiveDate};

/// A garage's rule for when to remind: vehicles whose tracked date lands
/// exactly `days_before` days after the run date get a reminder. A garage
/// may hold several schedules for the same type (e.g. a 30-day and a 7-day
/// MOT reminder).
#[derive(Debug, Clone)]
pub struct ReminderSchedule {
    pub id: ID,
    pub garage_id: ID,
    pub reminder_type: ReminderType,
    /// Calendar-day offset from the due date; 0 or negative means on/after
    /// the due date
    pub days_before: i64,
    pub is_enabled: bool,
}

impl ReminderSchedule {
    pub fn new(garage_id: ID, reminder_type: ReminderType, days_before: i64) -> Self {
        Self {
            id: Default::default(),
            garage_id,
            reminder_type,
            days_before,
            is_enabled: true,
        }
    }

    /// The due date this schedule matches when run on `today`. Plain
    /// calendar-day arithmetic, so a run is stable regardless of the
    /// time of day it fires at.
    pub fn target_date(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.days_before)
    }
}

impl Entity for ReminderSchedule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn target_date_is_exact_offset() {
        let schedule = ReminderSchedule::new(Default::default(), ReminderType::Mot, 30);
        // 13 Jan + 30 days = 12 Feb: a vehicle due 12 Feb matches on the
        // 13 Jan run and on no other
        assert_eq!(schedule.target_date(date(2026, 1, 13)), date(2026, 2, 12));
        assert_ne!(schedule.target_date(date(2026, 1, 14)), date(2026, 2, 12));
    }

    #[test]
    fn zero_and_negative_offsets_hit_on_or_after_due() {
        let on_due = ReminderSchedule::new(Default::default(), ReminderType::Service, 0);
        assert_eq!(on_due.target_date(date(2026, 3, 1)), date(2026, 3, 1));

        let after_due = ReminderSchedule::new(Default::default(), ReminderType::Repair, -7);
        assert_eq!(after_due.target_date(date(2026, 3, 8)), date(2026, 3, 1));
    }

    #[test]
    fn offset_crosses_month_and_year_boundaries() {
        let schedule = ReminderSchedule::new(Default::default(), ReminderType::Tyre, 30);
        assert_eq!(schedule.target_date(date(2025, 12, 15)), date(2026, 1, 14));
    }
}
