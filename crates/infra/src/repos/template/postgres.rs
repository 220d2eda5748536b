use super::IMessageTemplateRepo;
use garagealert_domain::{Channel, MessageTemplate, ReminderType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresMessageTemplateRepo {
    pool: PgPool,
}

impl PostgresMessageTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MessageTemplateRaw {
    message_template_uid: Uuid,
    garage_uid: Uuid,
    reminder_type: String,
    channel: String,
    name: String,
    subject: Option<String>,
    body: String,
}

impl From<MessageTemplateRaw> for MessageTemplate {
    fn from(e: MessageTemplateRaw) -> Self {
        Self {
            id: e.message_template_uid.into(),
            garage_id: e.garage_uid.into(),
            reminder_type: e.reminder_type.parse().unwrap(),
            channel: e.channel.parse().unwrap(),
            name: e.name,
            subject: e.subject,
            body: e.body,
        }
    }
}

#[async_trait::async_trait]
impl IMessageTemplateRepo for PostgresMessageTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO message_templates
            (message_template_uid, garage_uid, reminder_type, channel, name, subject, body)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(*template.id.inner_ref())
        .bind(*template.garage_id.inner_ref())
        .bind(template.reminder_type.as_str())
        .bind(template.channel.as_str())
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert message template: {:?}. DB returned error: {:?}",
                template, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        let res: Option<MessageTemplateRaw> = sqlx::query_as(
            r#"
            SELECT * FROM message_templates
            WHERE message_template_uid = $1
            "#,
        )
        .bind(*template_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find message template with id: {:?} failed. DB returned error: {:?}",
                template_id, e
            );
            e
        })
        .ok()?;
        res.map(|template| template.into())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<MessageTemplate>> {
        let templates_raw: Vec<MessageTemplateRaw> = sqlx::query_as(
            r#"
            SELECT * FROM message_templates
            WHERE garage_uid = $1
            ORDER BY reminder_type, channel
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find message templates for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(templates_raw.into_iter().map(|t| t.into()).collect())
    }

    async fn find_by_type_and_channel(
        &self,
        garage_id: &ID,
        reminder_type: ReminderType,
        channel: Channel,
    ) -> Option<MessageTemplate> {
        let res: Option<MessageTemplateRaw> = sqlx::query_as(
            r#"
            SELECT * FROM message_templates
            WHERE garage_uid = $1 AND reminder_type = $2 AND channel = $3
            LIMIT 1
            "#,
        )
        .bind(*garage_id.inner_ref())
        .bind(reminder_type.as_str())
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find message template for garage: {:?}, type: {}, channel: {} failed. DB returned error: {:?}",
                garage_id, reminder_type, channel, e
            );
            e
        })
        .ok()?;
        res.map(|template| template.into())
    }
}
