mod consent;
mod customer;
mod garage;
mod message_log;
mod reminder;
mod schedule;
mod shared;
mod template;
mod vehicle;

pub use consent::IConsentRecordRepo;
pub use customer::ICustomerRepo;
pub use garage::IGarageRepo;
pub use message_log::IMessageLogRepo;
pub use reminder::IScheduledReminderRepo;
pub use schedule::IReminderScheduleRepo;
pub use template::IMessageTemplateRepo;
pub use vehicle::IVehicleRepo;

use consent::{InMemoryConsentRecordRepo, PostgresConsentRecordRepo};
use customer::{InMemoryCustomerRepo, PostgresCustomerRepo};
use garage::{InMemoryGarageRepo, PostgresGarageRepo};
use message_log::{InMemoryMessageLogRepo, PostgresMessageLogRepo};
use reminder::{InMemoryScheduledReminderRepo, PostgresScheduledReminderRepo};
use schedule::{InMemoryReminderScheduleRepo, PostgresReminderScheduleRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use template::{InMemoryMessageTemplateRepo, PostgresMessageTemplateRepo};
use tracing::info;
use vehicle::{InMemoryVehicleRepo, PostgresVehicleRepo};

#[derive(Clone)]
pub struct Repos {
    pub garages: Arc<dyn IGarageRepo>,
    pub customers: Arc<dyn ICustomerRepo>,
    pub vehicles: Arc<dyn IVehicleRepo>,
    pub consents: Arc<dyn IConsentRecordRepo>,
    pub schedules: Arc<dyn IReminderScheduleRepo>,
    pub templates: Arc<dyn IMessageTemplateRepo>,
    pub reminders: Arc<dyn IScheduledReminderRepo>,
    pub message_logs: Arc<dyn IMessageLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            garages: Arc::new(PostgresGarageRepo::new(pool.clone())),
            customers: Arc::new(PostgresCustomerRepo::new(pool.clone())),
            vehicles: Arc::new(PostgresVehicleRepo::new(pool.clone())),
            consents: Arc::new(PostgresConsentRecordRepo::new(pool.clone())),
            schedules: Arc::new(PostgresReminderScheduleRepo::new(pool.clone())),
            templates: Arc::new(PostgresMessageTemplateRepo::new(pool.clone())),
            reminders: Arc::new(PostgresScheduledReminderRepo::new(pool.clone())),
            message_logs: Arc::new(PostgresMessageLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            garages: Arc::new(InMemoryGarageRepo::new()),
            customers: Arc::new(InMemoryCustomerRepo::new()),
            vehicles: Arc::new(InMemoryVehicleRepo::new()),
            consents: Arc::new(InMemoryConsentRecordRepo::new()),
            schedules: Arc::new(InMemoryReminderScheduleRepo::new()),
            templates: Arc::new(InMemoryMessageTemplateRepo::new()),
            reminders: Arc::new(InMemoryScheduledReminderRepo::new()),
            message_logs: Arc::new(InMemoryMessageLogRepo::new()),
        }
    }
}
