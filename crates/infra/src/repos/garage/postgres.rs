use super::IGarageRepo;
use garagealert_domain::{Garage, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresGarageRepo {
    pool: PgPool,
}

impl PostgresGarageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GarageRaw {
    garage_uid: Uuid,
    name: String,
    address_line_1: Option<String>,
    address_line_2: Option<String>,
    city: Option<String>,
    postcode: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    secret_api_key: String,
    subscription_status: String,
}

impl From<GarageRaw> for Garage {
    fn from(e: GarageRaw) -> Self {
        Self {
            id: e.garage_uid.into(),
            name: e.name,
            address_line_1: e.address_line_1,
            address_line_2: e.address_line_2,
            city: e.city,
            postcode: e.postcode,
            phone: e.phone,
            email: e.email,
            secret_api_key: e.secret_api_key,
            subscription_status: e.subscription_status.parse().unwrap(),
        }
    }
}

#[async_trait::async_trait]
impl IGarageRepo for PostgresGarageRepo {
    async fn insert(&self, garage: &Garage) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO garages
            (garage_uid, name, address_line_1, address_line_2, city, postcode, phone, email, secret_api_key, subscription_status)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*garage.id.inner_ref())
        .bind(&garage.name)
        .bind(&garage.address_line_1)
        .bind(&garage.address_line_2)
        .bind(&garage.city)
        .bind(&garage.postcode)
        .bind(&garage.phone)
        .bind(&garage.email)
        .bind(&garage.secret_api_key)
        .bind(garage.subscription_status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert garage: {:?}. DB returned error: {:?}",
                garage, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, garage: &Garage) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE garages
            SET name = $2,
            address_line_1 = $3,
            address_line_2 = $4,
            city = $5,
            postcode = $6,
            phone = $7,
            email = $8,
            secret_api_key = $9,
            subscription_status = $10
            WHERE garage_uid = $1
            "#,
        )
        .bind(*garage.id.inner_ref())
        .bind(&garage.name)
        .bind(&garage.address_line_1)
        .bind(&garage.address_line_2)
        .bind(&garage.city)
        .bind(&garage.postcode)
        .bind(&garage.phone)
        .bind(&garage.email)
        .bind(&garage.secret_api_key)
        .bind(garage.subscription_status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save garage: {:?}. DB returned error: {:?}",
                garage, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, garage_id: &ID) -> Option<Garage> {
        let res: Option<GarageRaw> = sqlx::query_as(
            r#"
            SELECT * FROM garages
            WHERE garage_uid = $1
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find garage with id: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })
        .ok()?;
        res.map(|garage| garage.into())
    }

    async fn find_by_apikey(&self, api_key: &str) -> Option<Garage> {
        let res: Option<GarageRaw> = sqlx::query_as(
            r#"
            SELECT * FROM garages
            WHERE secret_api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Find garage by api key failed. DB returned error: {:?}", e);
            e
        })
        .ok()?;
        res.map(|garage| garage.into())
    }

    async fn find_eligible_for_reminders(&self) -> anyhow::Result<Vec<Garage>> {
        let garages_raw: Vec<GarageRaw> = sqlx::query_as(
            r#"
            SELECT * FROM garages
            WHERE subscription_status IN ('trialing', 'active')
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find garages eligible for reminders failed. DB returned error: {:?}",
                e
            );
            e
        })?;

        Ok(garages_raw.into_iter().map(|garage| garage.into()).collect())
    }
}
