use super::IMessageLogRepo;
use chrono::{DateTime, Utc};
use garagealert_domain::{MessageLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresMessageLogRepo {
    pool: PgPool,
}

impl PostgresMessageLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MessageLogRaw {
    message_log_uid: Uuid,
    garage_uid: Uuid,
    customer_uid: Option<Uuid>,
    vehicle_uid: Option<Uuid>,
    scheduled_reminder_uid: Option<Uuid>,
    channel: String,
    recipient: String,
    message_template_uid: Option<Uuid>,
    subject: Option<String>,
    body: String,
    status: String,
    provider_message_id: Option<String>,
    error_message: Option<String>,
    sent_at: DateTime<Utc>,
}

impl From<MessageLogRaw> for MessageLog {
    fn from(e: MessageLogRaw) -> Self {
        Self {
            id: e.message_log_uid.into(),
            garage_id: e.garage_uid.into(),
            customer_id: e.customer_uid.map(|uid| uid.into()),
            vehicle_id: e.vehicle_uid.map(|uid| uid.into()),
            scheduled_reminder_id: e.scheduled_reminder_uid.map(|uid| uid.into()),
            channel: e.channel.parse().unwrap(),
            recipient: e.recipient,
            template_id: e.message_template_uid.map(|uid| uid.into()),
            subject: e.subject,
            body: e.body,
            status: e.status.parse().unwrap(),
            provider_message_id: e.provider_message_id,
            error_message: e.error_message,
            sent_at: e.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IMessageLogRepo for PostgresMessageLogRepo {
    async fn insert(&self, log: &MessageLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO message_logs
            (message_log_uid, garage_uid, customer_uid, vehicle_uid, scheduled_reminder_uid,
             channel, recipient, message_template_uid, subject, body, status,
             provider_message_id, error_message, sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(*log.id.inner_ref())
        .bind(*log.garage_id.inner_ref())
        .bind(log.customer_id.as_ref().map(|id| *id.inner_ref()))
        .bind(log.vehicle_id.as_ref().map(|id| *id.inner_ref()))
        .bind(log.scheduled_reminder_id.as_ref().map(|id| *id.inner_ref()))
        .bind(log.channel.as_str())
        .bind(&log.recipient)
        .bind(log.template_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&log.subject)
        .bind(&log.body)
        .bind(log.status.as_str())
        .bind(&log.provider_message_id)
        .bind(&log.error_message)
        .bind(log.sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert message log: {:?}. DB returned error: {:?}",
                log, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<MessageLog>> {
        let logs_raw: Vec<MessageLogRaw> = sqlx::query_as(
            r#"
            SELECT * FROM message_logs
            WHERE garage_uid = $1
            ORDER BY sent_at DESC
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find message logs for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(logs_raw.into_iter().map(|l| l.into()).collect())
    }
}
