use crate::customer::Channel;
use crate::shared::entity::{Entity, ID};
use crate::vehicle::ReminderType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The pipeline's work item: one reminder for one vehicle/type, created
/// `pending` by the daily generation run and resolved by the dispatch run.
/// At most one exists per (vehicle, reminder type, scheduled_for) — that
/// uniqueness is what makes repeated generation runs safe.
#[derive(Debug, Clone)]
pub struct ScheduledReminder {
    pub id: ID,
    pub garage_id: ID,
    pub customer_id: ID,
    pub vehicle_id: ID,
    pub reminder_type: ReminderType,
    pub channel: Channel,
    /// Resolved at scheduling time; None when the garage has no template
    /// for the (type, channel) pair, which the dispatcher fails visibly
    pub template_id: Option<ID>,
    /// The run date the reminder is dispatched on
    pub scheduled_for: NaiveDate,
    pub days_before_due: Option<i64>,
    pub status: ReminderStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Sending,
    Sent,
    Failed,
    Skipped,
    Cancelled,
}

impl ReminderStatus {
    /// sent/failed/skipped/cancelled are final; nothing transitions out
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Sending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sending" => Ok(Self::Sending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::anyhow!("Unknown reminder status: {}", s)),
        }
    }
}

impl ScheduledReminder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        garage_id: ID,
        customer_id: ID,
        vehicle_id: ID,
        reminder_type: ReminderType,
        channel: Channel,
        template_id: Option<ID>,
        scheduled_for: NaiveDate,
        days_before_due: Option<i64>,
    ) -> Self {
        Self {
            id: Default::default(),
            garage_id,
            customer_id,
            vehicle_id,
            reminder_type,
            channel,
            template_id,
            scheduled_for,
            days_before_due,
            status: ReminderStatus::Pending,
            sent_at: None,
            error_message: None,
        }
    }

    pub fn mark_sending(&mut self) {
        if !self.status.is_terminal() {
            self.status = ReminderStatus::Sending;
        }
    }

    pub fn mark_sent(&mut self, sent_at: DateTime<Utc>) {
        if !self.status.is_terminal() {
            self.status = ReminderStatus::Sent;
            self.sent_at = Some(sent_at);
            self.error_message = None;
        }
    }

    pub fn mark_failed(&mut self, error_message: String) {
        if !self.status.is_terminal() {
            self.status = ReminderStatus::Failed;
            self.error_message = Some(error_message);
        }
    }
}

impl Entity for ScheduledReminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn reminder() -> ScheduledReminder {
        ScheduledReminder::new(
            Default::default(),
            Default::default(),
            Default::default(),
            ReminderType::Mot,
            Channel::Sms,
            None,
            NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
            Some(30),
        )
    }

    #[test]
    fn new_reminders_are_pending() {
        assert_eq!(reminder().status, ReminderStatus::Pending);
    }

    #[test]
    fn happy_path_transitions() {
        let mut reminder = reminder();
        reminder.mark_sending();
        assert_eq!(reminder.status, ReminderStatus::Sending);

        let sent_at = Utc.timestamp(1770000000, 0);
        reminder.mark_sent(sent_at);
        assert_eq!(reminder.status, ReminderStatus::Sent);
        assert_eq!(reminder.sent_at, Some(sent_at));
    }

    #[test]
    fn failure_records_the_error() {
        let mut reminder = reminder();
        reminder.mark_sending();
        reminder.mark_failed("provider rejected recipient".into());
        assert_eq!(reminder.status, ReminderStatus::Failed);
        assert_eq!(
            reminder.error_message.as_deref(),
            Some("provider rejected recipient")
        );
    }

    #[test]
    fn terminal_states_do_not_transition() {
        let mut reminder = reminder();
        reminder.mark_sent(Utc.timestamp(1770000000, 0));
        reminder.mark_failed("late failure".into());
        assert_eq!(reminder.status, ReminderStatus::Sent);
        assert!(reminder.error_message.is_none());

        let mut cancelled = self::reminder();
        cancelled.status = ReminderStatus::Cancelled;
        cancelled.mark_sending();
        assert_eq!(cancelled.status, ReminderStatus::Cancelled);
    }
}
