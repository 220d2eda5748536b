use crate::{
    error::AlertError,
    shared::{
        auth::protect_cron_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use garagealert_api_structs::generate_reminders::APIResponse;
use garagealert_domain::{
    sending_allowed, Channel, Customer, Garage, ReminderType, ScheduledReminder, Vehicle, ID,
};
use garagealert_infra::GarageAlertContext;
use std::collections::HashMap;
use tracing::{error, info};

pub async fn generate_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    protect_cron_route(&http_req, &ctx)?;

    let today = ctx.sys.get_utc_date();
    let usecase = GenerateRemindersUseCase { today };
    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                message: format!("Generated {} reminders", res.created),
                date: today,
                created: res.created,
            })
        })
        .map_err(AlertError::from)
}

/// The daily scheduler run: for every eligible garage and enabled schedule,
/// materializes `pending` reminders for vehicles whose tracked due date
/// lands exactly on `today + days_before`. Duplicate runs are no-ops
/// thanks to the (vehicle, type, scheduled_for) insert key.
#[derive(Debug)]
pub struct GenerateRemindersUseCase {
    pub today: NaiveDate,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub created: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GenerateRemindersUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GenerateReminders";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let garages = ctx
            .repos
            .garages
            .find_eligible_for_reminders()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut created = 0;
        for garage in garages {
            // One garage failing must not starve the rest of the run
            match generate_for_garage(&garage, self.today, ctx).await {
                Ok(count) => created += count,
                Err(e) => error!(
                    "Reminder generation failed for garage: {}. Error: {:?}",
                    garage.id, e
                ),
            }
        }

        info!("Generated {} reminders for {}", created, self.today);
        Ok(UseCaseRes { created })
    }
}

async fn generate_for_garage(
    garage: &Garage,
    today: NaiveDate,
    ctx: &GarageAlertContext,
) -> anyhow::Result<usize> {
    let schedules = ctx.repos.schedules.find_enabled_by_garage(&garage.id).await?;

    let mut created = 0;
    for schedule in schedules {
        let target_date = schedule.target_date(today);
        let due = find_due_vehicles(&garage.id, schedule.reminder_type, target_date, ctx).await?;

        for (vehicle, customer) in due {
            let channel = customer.preferred_channel;
            if !channel_allowed(&customer.id, channel, ctx).await {
                continue;
            }

            // A garage without a matching template still gets the reminder
            // scheduled (with no template reference), so the dispatcher
            // fails it visibly instead of it silently never existing
            let template = ctx
                .repos
                .templates
                .find_by_type_and_channel(&garage.id, schedule.reminder_type, channel)
                .await;

            let reminder = ScheduledReminder::new(
                garage.id.clone(),
                customer.id.clone(),
                vehicle.id.clone(),
                schedule.reminder_type,
                channel,
                template.map(|t| t.id),
                today,
                Some(schedule.days_before),
            );

            if ctx.repos.reminders.insert_if_absent(&reminder).await? {
                created += 1;
            }
        }
    }

    Ok(created)
}

/// The due-date matcher: vehicles under the garage whose date field for
/// `reminder_type` equals `target_date` exactly and whose per-type flag is
/// on, paired with their owners. No matches is an empty list, not an error.
async fn find_due_vehicles(
    garage_id: &ID,
    reminder_type: ReminderType,
    target_date: NaiveDate,
    ctx: &GarageAlertContext,
) -> anyhow::Result<Vec<(Vehicle, Customer)>> {
    let vehicles = ctx
        .repos
        .vehicles
        .find_due(garage_id, reminder_type, target_date)
        .await?;
    if vehicles.is_empty() {
        return Ok(Vec::new());
    }

    let customer_ids: Vec<_> = vehicles.iter().map(|v| v.customer_id.clone()).collect();
    let customers: HashMap<String, Customer> = ctx
        .repos
        .customers
        .find_many(&customer_ids)
        .await?
        .into_iter()
        .map(|c| (c.id.as_string(), c))
        .collect();

    // A customer may own several vehicles due on the same date, so the
    // lookup must not consume the entry
    Ok(vehicles
        .into_iter()
        .filter_map(|vehicle| {
            customers
                .get(&vehicle.customer_id.as_string())
                .cloned()
                .map(|customer| (vehicle, customer))
        })
        .collect())
}

/// The consent gate: the most recent record for (customer, channel)
/// decides, and a customer with no record at all is allowed. Opting out is
/// explicit.
async fn channel_allowed(customer_id: &ID, channel: Channel, ctx: &GarageAlertContext) -> bool {
    let latest = ctx.repos.consents.find_latest(customer_id, channel).await;
    sending_allowed(latest.as_ref())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use garagealert_domain::{
        ConsentMethod, ConsentRecord, MessageTemplate, ReminderSchedule, ReminderStatus,
        SubscriptionStatus,
    };
    use garagealert_infra::ISys;
    use std::sync::Arc;

    struct StaticSys {
        date: NaiveDate,
    }

    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.get_utc_datetime().timestamp_millis()
        }

        fn get_utc_datetime(&self) -> DateTime<Utc> {
            Utc.timestamp(1768262400, 0) // 13 Jan 2026 00:00:00 UTC
        }

        fn get_utc_date(&self) -> NaiveDate {
            self.date
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
    }

    struct TestContext {
        ctx: GarageAlertContext,
        garage: Garage,
        customer: Customer,
        vehicle: Vehicle,
    }

    /// Garage with one sms customer and one vehicle whose MOT lands
    /// exactly 30 days after `today`, plus an enabled 30-day MOT schedule
    /// and a matching sms template.
    async fn setup() -> TestContext {
        let mut ctx = GarageAlertContext::create_inmemory();
        ctx.sys = Arc::new(StaticSys { date: today() });

        let garage = Garage::new("Speedy Motors".into());
        ctx.repos.garages.insert(&garage).await.unwrap();

        let mut customer = Customer::new(garage.id.clone(), "Jane".into(), "Doe".into());
        customer.phone = Some("07700 900000".into());
        customer.preferred_channel = Channel::Sms;
        ctx.repos.customers.insert(&customer).await.unwrap();

        let mut vehicle = Vehicle::new(customer.id.clone(), garage.id.clone(), "AB12CDE".into());
        vehicle.mot_due_date = Some(today() + Duration::days(30));
        ctx.repos.vehicles.insert(&vehicle).await.unwrap();

        let schedule = ReminderSchedule::new(garage.id.clone(), ReminderType::Mot, 30);
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let template = MessageTemplate::new(
            garage.id.clone(),
            ReminderType::Mot,
            Channel::Sms,
            "30 day MOT".into(),
            "Hi {first_name}, your {vehicle_reg} MOT is due {due_date}".into(),
        );
        ctx.repos.templates.insert(&template).await.unwrap();

        TestContext {
            ctx,
            garage,
            customer,
            vehicle,
        }
    }

    async fn run(ctx: &GarageAlertContext) -> UseCaseRes {
        execute(GenerateRemindersUseCase { today: today() }, ctx)
            .await
            .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn it_creates_pending_reminders_for_due_vehicles() {
        let TestContext {
            ctx,
            garage,
            customer,
            vehicle,
        } = setup().await;

        let res = run(&ctx).await;
        assert_eq!(res.created, 1);

        let reminders = ctx.repos.reminders.find_by_garage(&garage.id).await.unwrap();
        assert_eq!(reminders.len(), 1);
        let reminder = &reminders[0];
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.customer_id, customer.id);
        assert_eq!(reminder.vehicle_id, vehicle.id);
        assert_eq!(reminder.reminder_type, ReminderType::Mot);
        assert_eq!(reminder.channel, Channel::Sms);
        assert_eq!(reminder.scheduled_for, today());
        assert_eq!(reminder.days_before_due, Some(30));
        assert!(reminder.template_id.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn a_second_run_for_the_same_date_creates_nothing() {
        let TestContext { ctx, garage, .. } = setup().await;

        let first = run(&ctx).await;
        assert_eq!(first.created, 1);

        let second = run(&ctx).await;
        assert_eq!(second.created, 0);

        let reminders = ctx.repos.reminders.find_by_garage(&garage.id).await.unwrap();
        assert_eq!(reminders.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn vehicles_due_on_other_dates_are_not_matched() {
        let TestContext {
            ctx, mut vehicle, ..
        } = setup().await;

        // One day off the 30-day window in both directions
        vehicle.mot_due_date = Some(today() + Duration::days(29));
        ctx.repos.vehicles.save(&vehicle).await.unwrap();
        assert_eq!(run(&ctx).await.created, 0);

        vehicle.mot_due_date = Some(today() + Duration::days(31));
        ctx.repos.vehicles.save(&vehicle).await.unwrap();
        assert_eq!(run(&ctx).await.created, 0);
    }

    #[actix_web::main]
    #[test]
    async fn disabled_reminder_flags_exclude_the_vehicle() {
        let TestContext {
            ctx, mut vehicle, ..
        } = setup().await;

        vehicle.mot_reminder_enabled = false;
        ctx.repos.vehicles.save(&vehicle).await.unwrap();

        assert_eq!(run(&ctx).await.created, 0);
    }

    #[actix_web::main]
    #[test]
    async fn opted_out_customers_are_skipped() {
        let TestContext { ctx, customer, .. } = setup().await;

        let record = ConsentRecord::opt_out(
            customer.id.clone(),
            Channel::Sms,
            ConsentMethod::StopKeyword,
            Utc.timestamp(1768176000, 0),
        );
        ctx.repos.consents.insert(&record).await.unwrap();

        assert_eq!(run(&ctx).await.created, 0);
    }

    #[actix_web::main]
    #[test]
    async fn an_opt_out_on_another_channel_does_not_block() {
        let TestContext { ctx, customer, .. } = setup().await;

        // Customer prefers sms; an email opt-out must not matter
        let record = ConsentRecord::opt_out(
            customer.id.clone(),
            Channel::Email,
            ConsentMethod::UnsubscribeLink,
            Utc.timestamp(1768176000, 0),
        );
        ctx.repos.consents.insert(&record).await.unwrap();

        assert_eq!(run(&ctx).await.created, 1);
    }

    #[actix_web::main]
    #[test]
    async fn re_opt_in_after_opt_out_allows_scheduling() {
        let TestContext { ctx, customer, .. } = setup().await;

        let opt_out = ConsentRecord::opt_out(
            customer.id.clone(),
            Channel::Sms,
            ConsentMethod::StopKeyword,
            Utc.timestamp(1768176000, 0),
        );
        ctx.repos.consents.insert(&opt_out).await.unwrap();
        let opt_in = ConsentRecord::opt_in(
            customer.id.clone(),
            Channel::Sms,
            ConsentMethod::Staff,
            Utc.timestamp(1768179600, 0),
        );
        ctx.repos.consents.insert(&opt_in).await.unwrap();

        assert_eq!(run(&ctx).await.created, 1);
    }

    #[actix_web::main]
    #[test]
    async fn a_missing_template_still_schedules_the_reminder() {
        let mut test = setup().await;

        // Switch the customer to email, for which no template exists
        test.customer.email = Some("jane@example.com".into());
        test.customer.preferred_channel = Channel::Email;
        test.ctx.repos.customers.save(&test.customer).await.unwrap();

        let res = run(&test.ctx).await;
        assert_eq!(res.created, 1);

        let reminders = test
            .ctx
            .repos
            .reminders
            .find_by_garage(&test.garage.id)
            .await
            .unwrap();
        assert_eq!(reminders.len(), 1);
        assert!(reminders[0].template_id.is_none());
        assert_eq!(reminders[0].channel, Channel::Email);
    }

    #[actix_web::main]
    #[test]
    async fn ineligible_garages_are_excluded() {
        let mut test = setup().await;

        test.garage.subscription_status = SubscriptionStatus::Cancelled;
        test.ctx.repos.garages.save(&test.garage).await.unwrap();
        assert_eq!(run(&test.ctx).await.created, 0);

        test.garage.subscription_status = SubscriptionStatus::PastDue;
        test.ctx.repos.garages.save(&test.garage).await.unwrap();
        assert_eq!(run(&test.ctx).await.created, 0);

        test.garage.subscription_status = SubscriptionStatus::Active;
        test.ctx.repos.garages.save(&test.garage).await.unwrap();
        assert_eq!(run(&test.ctx).await.created, 1);
    }

    #[actix_web::main]
    #[test]
    async fn disabled_schedules_generate_nothing() {
        let TestContext { ctx, garage, .. } = setup().await;

        // Replace the enabled schedule set with a disabled one by using a
        // fresh garage sharing the same data shape
        let garage2 = Garage::new("Slow Motors".into());
        ctx.repos.garages.insert(&garage2).await.unwrap();
        let mut customer2 = Customer::new(garage2.id.clone(), "Joe".into(), "Bloggs".into());
        customer2.phone = Some("07700 900001".into());
        ctx.repos.customers.insert(&customer2).await.unwrap();
        let mut vehicle2 = Vehicle::new(customer2.id.clone(), garage2.id.clone(), "CD34EFG".into());
        vehicle2.mot_due_date = Some(today() + Duration::days(30));
        ctx.repos.vehicles.insert(&vehicle2).await.unwrap();
        let mut schedule2 = ReminderSchedule::new(garage2.id.clone(), ReminderType::Mot, 30);
        schedule2.is_enabled = false;
        ctx.repos.schedules.insert(&schedule2).await.unwrap();

        let res = run(&ctx).await;
        // Only the first garage's enabled schedule fires
        assert_eq!(res.created, 1);
        let reminders = ctx.repos.reminders.find_by_garage(&garage2.id).await.unwrap();
        assert!(reminders.is_empty());
        let reminders = ctx.repos.reminders.find_by_garage(&garage.id).await.unwrap();
        assert_eq!(reminders.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn multiple_schedules_per_type_match_independently() {
        let TestContext {
            ctx,
            garage,
            customer,
            ..
        } = setup().await;

        // A second vehicle due in exactly 7 days plus a 7-day schedule
        let schedule = ReminderSchedule::new(garage.id.clone(), ReminderType::Mot, 7);
        ctx.repos.schedules.insert(&schedule).await.unwrap();

        let mut vehicle2 = Vehicle::new(customer.id.clone(), garage.id.clone(), "EF56GHI".into());
        vehicle2.mot_due_date = Some(today() + Duration::days(7));
        ctx.repos.vehicles.insert(&vehicle2).await.unwrap();

        let res = run(&ctx).await;
        assert_eq!(res.created, 2);
    }

    #[actix_web::main]
    #[test]
    async fn one_customer_with_two_vehicles_due_the_same_day_gets_both() {
        let TestContext {
            ctx,
            garage,
            customer,
            ..
        } = setup().await;

        let mut vehicle2 = Vehicle::new(customer.id.clone(), garage.id.clone(), "EF56GHI".into());
        vehicle2.mot_due_date = Some(today() + Duration::days(30));
        ctx.repos.vehicles.insert(&vehicle2).await.unwrap();

        let res = run(&ctx).await;
        assert_eq!(res.created, 2);
    }
}
