use super::ICustomerRepo;
use garagealert_domain::{Customer, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresCustomerRepo {
    pool: PgPool,
}

impl PostgresCustomerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRaw {
    customer_uid: Uuid,
    garage_uid: Uuid,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    email: Option<String>,
    preferred_channel: String,
    notes: Option<String>,
}

impl From<CustomerRaw> for Customer {
    fn from(e: CustomerRaw) -> Self {
        Self {
            id: e.customer_uid.into(),
            garage_id: e.garage_uid.into(),
            first_name: e.first_name,
            last_name: e.last_name,
            phone: e.phone,
            email: e.email,
            preferred_channel: e.preferred_channel.parse().unwrap(),
            notes: e.notes,
        }
    }
}

#[async_trait::async_trait]
impl ICustomerRepo for PostgresCustomerRepo {
    async fn insert(&self, customer: &Customer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers
            (customer_uid, garage_uid, first_name, last_name, phone, email, preferred_channel, notes)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(*customer.id.inner_ref())
        .bind(*customer.garage_id.inner_ref())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(customer.preferred_channel.as_str())
        .bind(&customer.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert customer: {:?}. DB returned error: {:?}",
                customer, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, customer: &Customer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET first_name = $2,
            last_name = $3,
            phone = $4,
            email = $5,
            preferred_channel = $6,
            notes = $7
            WHERE customer_uid = $1
            "#,
        )
        .bind(*customer.id.inner_ref())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(customer.preferred_channel.as_str())
        .bind(&customer.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save customer: {:?}. DB returned error: {:?}",
                customer, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, customer_id: &ID) -> Option<Customer> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM customers
            WHERE customer_uid = $1
            "#,
        )
        .bind(*customer_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customer with id: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })
        .ok()?;
        res.map(|customer| customer.into())
    }

    async fn find_many(&self, customer_ids: &[ID]) -> anyhow::Result<Vec<Customer>> {
        let ids = customer_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let customers_raw: Vec<CustomerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM customers
            WHERE customer_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customers with ids: {:?} failed. DB returned error: {:?}",
                customer_ids, e
            );
            e
        })?;

        Ok(customers_raw.into_iter().map(|c| c.into()).collect())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<Customer>> {
        let customers_raw: Vec<CustomerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM customers
            WHERE garage_uid = $1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customers for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(customers_raw.into_iter().map(|c| c.into()).collect())
    }

    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Vec<Customer>> {
        let customers_raw: Vec<CustomerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM customers
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customers by phone failed. DB returned error: {:?}",
                e
            );
            e
        })?;

        Ok(customers_raw.into_iter().map(|c| c.into()).collect())
    }
}
