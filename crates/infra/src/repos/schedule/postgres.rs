use super::IReminderScheduleRepo;
use garagealert_domain::{ReminderSchedule, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderScheduleRepo {
    pool: PgPool,
}

impl PostgresReminderScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderScheduleRaw {
    reminder_schedule_uid: Uuid,
    garage_uid: Uuid,
    reminder_type: String,
    days_before: i64,
    is_enabled: bool,
}

impl From<ReminderScheduleRaw> for ReminderSchedule {
    fn from(e: ReminderScheduleRaw) -> Self {
        Self {
            id: e.reminder_schedule_uid.into(),
            garage_id: e.garage_uid.into(),
            reminder_type: e.reminder_type.parse().unwrap(),
            days_before: e.days_before,
            is_enabled: e.is_enabled,
        }
    }
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for PostgresReminderScheduleRepo {
    async fn insert(&self, schedule: &ReminderSchedule) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_schedules
            (reminder_schedule_uid, garage_uid, reminder_type, days_before, is_enabled)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*schedule.id.inner_ref())
        .bind(*schedule.garage_id.inner_ref())
        .bind(schedule.reminder_type.as_str())
        .bind(schedule.days_before)
        .bind(schedule.is_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder schedule: {:?}. DB returned error: {:?}",
                schedule, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        let schedules_raw: Vec<ReminderScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE garage_uid = $1
            ORDER BY reminder_type, days_before DESC
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder schedules for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(schedules_raw.into_iter().map(|s| s.into()).collect())
    }

    async fn find_enabled_by_garage(
        &self,
        garage_id: &ID,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        let schedules_raw: Vec<ReminderScheduleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_schedules
            WHERE garage_uid = $1 AND is_enabled = TRUE
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find enabled reminder schedules for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(schedules_raw.into_iter().map(|s| s.into()).collect())
    }
}
