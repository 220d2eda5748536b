use super::IScheduledReminderRepo;
use chrono::{DateTime, NaiveDate, Utc};
use garagealert_domain::{ScheduledReminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresScheduledReminderRepo {
    pool: PgPool,
}

impl PostgresScheduledReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledReminderRaw {
    scheduled_reminder_uid: Uuid,
    garage_uid: Uuid,
    customer_uid: Uuid,
    vehicle_uid: Uuid,
    reminder_type: String,
    channel: String,
    message_template_uid: Option<Uuid>,
    scheduled_for: NaiveDate,
    days_before_due: Option<i64>,
    status: String,
    sent_at: Option<DateTime<Utc>>,
    error_message: Option<String>,
}

impl From<ScheduledReminderRaw> for ScheduledReminder {
    fn from(e: ScheduledReminderRaw) -> Self {
        Self {
            id: e.scheduled_reminder_uid.into(),
            garage_id: e.garage_uid.into(),
            customer_id: e.customer_uid.into(),
            vehicle_id: e.vehicle_uid.into(),
            reminder_type: e.reminder_type.parse().unwrap(),
            channel: e.channel.parse().unwrap(),
            template_id: e.message_template_uid.map(|uid| uid.into()),
            scheduled_for: e.scheduled_for,
            days_before_due: e.days_before_due,
            status: e.status.parse().unwrap(),
            sent_at: e.sent_at,
            error_message: e.error_message,
        }
    }
}

#[async_trait::async_trait]
impl IScheduledReminderRepo for PostgresScheduledReminderRepo {
    async fn insert_if_absent(&self, reminder: &ScheduledReminder) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO scheduled_reminders
            (scheduled_reminder_uid, garage_uid, customer_uid, vehicle_uid, reminder_type,
             channel, message_template_uid, scheduled_for, days_before_due, status, sent_at, error_message)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (vehicle_uid, reminder_type, scheduled_for) DO NOTHING
            "#,
        )
        .bind(*reminder.id.inner_ref())
        .bind(*reminder.garage_id.inner_ref())
        .bind(*reminder.customer_id.inner_ref())
        .bind(*reminder.vehicle_id.inner_ref())
        .bind(reminder.reminder_type.as_str())
        .bind(reminder.channel.as_str())
        .bind(reminder.template_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.scheduled_for)
        .bind(reminder.days_before_due)
        .bind(reminder.status.as_str())
        .bind(reminder.sent_at)
        .bind(&reminder.error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert scheduled reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(res.rows_affected() == 1)
    }

    async fn save(&self, reminder: &ScheduledReminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE scheduled_reminders
            SET status = $2,
            sent_at = $3,
            error_message = $4
            WHERE scheduled_reminder_uid = $1
            "#,
        )
        .bind(*reminder.id.inner_ref())
        .bind(reminder.status.as_str())
        .bind(reminder.sent_at)
        .bind(&reminder.error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save scheduled reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ScheduledReminder> {
        let res: Option<ScheduledReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_reminders
            WHERE scheduled_reminder_uid = $1
            "#,
        )
        .bind(*reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find scheduled reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.map(|reminder| reminder.into())
    }

    async fn find_pending_by_date(
        &self,
        scheduled_for: NaiveDate,
        limit: i64,
    ) -> anyhow::Result<Vec<ScheduledReminder>> {
        let reminders_raw: Vec<ScheduledReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_reminders
            WHERE scheduled_for = $1 AND status = 'pending'
            LIMIT $2
            "#,
        )
        .bind(scheduled_for)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find pending reminders for date: {} failed. DB returned error: {:?}",
                scheduled_for, e
            );
            e
        })?;

        Ok(reminders_raw.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<ScheduledReminder>> {
        let reminders_raw: Vec<ScheduledReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_reminders
            WHERE garage_uid = $1
            ORDER BY scheduled_for DESC
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find scheduled reminders for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(reminders_raw.into_iter().map(|r| r.into()).collect())
    }

    async fn reclaim_stuck_sending(
        &self,
        before: NaiveDate,
        error_message: &str,
    ) -> anyhow::Result<i64> {
        let res = sqlx::query(
            r#"
            UPDATE scheduled_reminders
            SET status = 'failed', error_message = $2
            WHERE status = 'sending' AND scheduled_for < $1
            "#,
        )
        .bind(before)
        .bind(error_message)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Reclaim of stuck sending reminders before: {} failed. DB returned error: {:?}",
                before, e
            );
            e
        })?;
        Ok(res.rows_affected() as i64)
    }
}
