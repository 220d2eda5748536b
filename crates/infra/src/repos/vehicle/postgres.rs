use super::IVehicleRepo;
use chrono::NaiveDate;
use garagealert_domain::{ReminderType, Vehicle, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresVehicleRepo {
    pool: PgPool,
}

impl PostgresVehicleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VehicleRaw {
    vehicle_uid: Uuid,
    customer_uid: Uuid,
    garage_uid: Uuid,
    registration: String,
    make: Option<String>,
    model: Option<String>,
    mot_due_date: Option<NaiveDate>,
    next_service_date: Option<NaiveDate>,
    tyre_check_due_date: Option<NaiveDate>,
    repair_followup_date: Option<NaiveDate>,
    mot_reminder_enabled: bool,
    service_reminder_enabled: bool,
    tyre_reminder_enabled: bool,
    repair_reminder_enabled: bool,
}

impl From<VehicleRaw> for Vehicle {
    fn from(e: VehicleRaw) -> Self {
        Self {
            id: e.vehicle_uid.into(),
            customer_id: e.customer_uid.into(),
            garage_id: e.garage_uid.into(),
            registration: e.registration,
            make: e.make,
            model: e.model,
            mot_due_date: e.mot_due_date,
            next_service_date: e.next_service_date,
            tyre_check_due_date: e.tyre_check_due_date,
            repair_followup_date: e.repair_followup_date,
            mot_reminder_enabled: e.mot_reminder_enabled,
            service_reminder_enabled: e.service_reminder_enabled,
            tyre_reminder_enabled: e.tyre_reminder_enabled,
            repair_reminder_enabled: e.repair_reminder_enabled,
        }
    }
}

/// Column pair a reminder type maps onto. Fixed strings, never user input.
fn reminder_type_columns(reminder_type: ReminderType) -> (&'static str, &'static str) {
    match reminder_type {
        ReminderType::Mot => ("mot_due_date", "mot_reminder_enabled"),
        ReminderType::Service => ("next_service_date", "service_reminder_enabled"),
        ReminderType::Tyre => ("tyre_check_due_date", "tyre_reminder_enabled"),
        ReminderType::Repair => ("repair_followup_date", "repair_reminder_enabled"),
    }
}

#[async_trait::async_trait]
impl IVehicleRepo for PostgresVehicleRepo {
    async fn insert(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles
            (vehicle_uid, customer_uid, garage_uid, registration, make, model,
             mot_due_date, next_service_date, tyre_check_due_date, repair_followup_date,
             mot_reminder_enabled, service_reminder_enabled, tyre_reminder_enabled, repair_reminder_enabled)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(*vehicle.id.inner_ref())
        .bind(*vehicle.customer_id.inner_ref())
        .bind(*vehicle.garage_id.inner_ref())
        .bind(&vehicle.registration)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.mot_due_date)
        .bind(vehicle.next_service_date)
        .bind(vehicle.tyre_check_due_date)
        .bind(vehicle.repair_followup_date)
        .bind(vehicle.mot_reminder_enabled)
        .bind(vehicle.service_reminder_enabled)
        .bind(vehicle.tyre_reminder_enabled)
        .bind(vehicle.repair_reminder_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert vehicle: {:?}. DB returned error: {:?}",
                vehicle, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, vehicle: &Vehicle) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE vehicles
            SET registration = $2,
            make = $3,
            model = $4,
            mot_due_date = $5,
            next_service_date = $6,
            tyre_check_due_date = $7,
            repair_followup_date = $8,
            mot_reminder_enabled = $9,
            service_reminder_enabled = $10,
            tyre_reminder_enabled = $11,
            repair_reminder_enabled = $12
            WHERE vehicle_uid = $1
            "#,
        )
        .bind(*vehicle.id.inner_ref())
        .bind(&vehicle.registration)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.mot_due_date)
        .bind(vehicle.next_service_date)
        .bind(vehicle.tyre_check_due_date)
        .bind(vehicle.repair_followup_date)
        .bind(vehicle.mot_reminder_enabled)
        .bind(vehicle.service_reminder_enabled)
        .bind(vehicle.tyre_reminder_enabled)
        .bind(vehicle.repair_reminder_enabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save vehicle: {:?}. DB returned error: {:?}",
                vehicle, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, vehicle_id: &ID) -> Option<Vehicle> {
        let res: Option<VehicleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM vehicles
            WHERE vehicle_uid = $1
            "#,
        )
        .bind(*vehicle_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find vehicle with id: {:?} failed. DB returned error: {:?}",
                vehicle_id, e
            );
            e
        })
        .ok()?;
        res.map(|vehicle| vehicle.into())
    }

    async fn find_by_garage(&self, garage_id: &ID) -> anyhow::Result<Vec<Vehicle>> {
        let vehicles_raw: Vec<VehicleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM vehicles
            WHERE garage_uid = $1
            ORDER BY registration
            "#,
        )
        .bind(*garage_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find vehicles for garage: {:?} failed. DB returned error: {:?}",
                garage_id, e
            );
            e
        })?;

        Ok(vehicles_raw.into_iter().map(|v| v.into()).collect())
    }

    async fn find_due(
        &self,
        garage_id: &ID,
        reminder_type: ReminderType,
        due_date: NaiveDate,
    ) -> anyhow::Result<Vec<Vehicle>> {
        let (date_column, enabled_column) = reminder_type_columns(reminder_type);
        let sql = format!(
            "SELECT * FROM vehicles WHERE garage_uid = $1 AND {} = $2 AND {} = TRUE",
            date_column, enabled_column
        );

        let vehicles_raw: Vec<VehicleRaw> = sqlx::query_as(&sql)
            .bind(*garage_id.inner_ref())
            .bind(due_date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find due vehicles for garage: {:?}, type: {}, date: {} failed. DB returned error: {:?}",
                    garage_id, reminder_type, due_date, e
                );
                e
            })?;

        Ok(vehicles_raw.into_iter().map(|v| v.into()).collect())
    }
}
