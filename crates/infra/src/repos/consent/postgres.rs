use super::IConsentRecordRepo;
use chrono::{DateTime, Utc};
use garagealert_domain::{Channel, ConsentRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresConsentRecordRepo {
    pool: PgPool,
}

impl PostgresConsentRecordRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ConsentRecordRaw {
    consent_record_uid: Uuid,
    customer_uid: Uuid,
    channel: String,
    status: String,
    method: String,
    collected_at: DateTime<Utc>,
}

impl From<ConsentRecordRaw> for ConsentRecord {
    fn from(e: ConsentRecordRaw) -> Self {
        Self {
            id: e.consent_record_uid.into(),
            customer_id: e.customer_uid.into(),
            channel: e.channel.parse().unwrap(),
            status: e.status.parse().unwrap(),
            method: e.method.parse().unwrap(),
            collected_at: e.collected_at,
        }
    }
}

#[async_trait::async_trait]
impl IConsentRecordRepo for PostgresConsentRecordRepo {
    async fn insert(&self, record: &ConsentRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO consent_records
            (consent_record_uid, customer_uid, channel, status, method, collected_at)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*record.id.inner_ref())
        .bind(*record.customer_id.inner_ref())
        .bind(record.channel.as_str())
        .bind(record.status.as_str())
        .bind(record.method.as_str())
        .bind(record.collected_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert consent record: {:?}. DB returned error: {:?}",
                record, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_latest(&self, customer_id: &ID, channel: Channel) -> Option<ConsentRecord> {
        let res: Option<ConsentRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM consent_records
            WHERE customer_uid = $1 AND channel = $2
            ORDER BY collected_at DESC
            LIMIT 1
            "#,
        )
        .bind(*customer_id.inner_ref())
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find latest consent record for customer: {:?}, channel: {} failed. DB returned error: {:?}",
                customer_id, channel, e
            );
            e
        })
        .ok()?;
        res.map(|record| record.into())
    }

    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<ConsentRecord>> {
        let records_raw: Vec<ConsentRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM consent_records
            WHERE customer_uid = $1
            ORDER BY collected_at DESC
            "#,
        )
        .bind(*customer_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find consent records for customer: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;

        Ok(records_raw.into_iter().map(|r| r.into()).collect())
    }
}
