use crate::{
    error::AlertError,
    shared::{
        auth::protect_cron_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use garagealert_api_structs::dispatch_reminders::APIResponse;
use garagealert_domain::{
    format_date_uk, render_template, Channel, Customer, DeliveryStatus, Garage, MessageLog,
    ScheduledReminder, TemplateTokens, Vehicle,
};
use garagealert_infra::GarageAlertContext;
use tracing::{error, info, warn};

/// Caps one dispatch run so it stays inside the trigger environment's
/// execution window. Anything beyond the cap stays pending and is picked
/// up by the next run for the same date.
const DISPATCH_BATCH_SIZE: i64 = 500;

const STUCK_SENDING_ERROR: &str = "Interrupted during a previous dispatch run";

pub async fn dispatch_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    protect_cron_route(&http_req, &ctx)?;

    let today = ctx.sys.get_utc_date();
    let usecase = DispatchRemindersUseCase { today };
    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                sent: res.sent,
                failed: res.failed,
                total: res.total,
                reclaimed: res.reclaimed,
                date: today,
            })
        })
        .map_err(AlertError::from)
}

/// The daily dispatch run: renders and sends every pending reminder
/// scheduled for `today` and resolves each to `sent` or `failed` with an
/// audit message-log row. Reminders already out of `pending` are never
/// selected again, which is what makes repeated runs safe.
#[derive(Debug)]
pub struct DispatchRemindersUseCase {
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
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub reclaimed: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchRemindersUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DispatchReminders";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        // Sweep rows a crashed earlier run left in `sending`; without this
        // they would sit unresolved forever since later runs only read
        // their own date
        let reclaimed = ctx
            .repos
            .reminders
            .reclaim_stuck_sending(self.today, STUCK_SENDING_ERROR)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if reclaimed > 0 {
            warn!("Reclaimed {} reminders stuck in sending", reclaimed);
        }

        let pending = ctx
            .repos
            .reminders
            .find_pending_by_date(self.today, DISPATCH_BATCH_SIZE)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let total = pending.len();
        let mut sent = 0;
        let mut failed = 0;
        for reminder in pending {
            if dispatch_one(reminder, ctx).await {
                sent += 1;
            } else {
                failed += 1;
            }
        }

        info!(
            "Dispatched reminders for {}: {} sent, {} failed",
            self.today, sent, failed
        );
        Ok(UseCaseRes {
            sent,
            failed,
            total,
            reclaimed: reclaimed as usize,
        })
    }
}

/// Sends one reminder and resolves its status. Every outcome, including a
/// data problem that prevents the send, leaves an audit row behind. One
/// bad reminder never takes down the batch.
async fn dispatch_one(mut reminder: ScheduledReminder, ctx: &GarageAlertContext) -> bool {
    let garage = ctx.repos.garages.find(&reminder.garage_id).await;
    let customer = ctx.repos.customers.find(&reminder.customer_id).await;
    let vehicle = ctx.repos.vehicles.find(&reminder.vehicle_id).await;
    let template = match &reminder.template_id {
        Some(template_id) => ctx.repos.templates.find(template_id).await,
        None => None,
    };

    let (garage, customer, vehicle, template) = match (garage, customer, vehicle, template) {
        (Some(g), Some(c), Some(v), Some(t)) => (g, c, v, t),
        (garage, customer, _, template) => {
            let error = if template.is_none() {
                "Missing template"
            } else if customer.is_none() {
                "Missing customer"
            } else if garage.is_none() {
                "Missing garage"
            } else {
                "Missing vehicle"
            };
            let recipient = customer
                .as_ref()
                .and_then(|c| c.contact_for_channel(reminder.channel))
                .unwrap_or_default()
                .to_string();
            return fail_without_send(reminder, garage, recipient, error.into(), ctx).await;
        }
    };

    let recipient = match customer.contact_for_channel(reminder.channel) {
        Some(contact) => contact.to_string(),
        None => {
            let error = format!(
                "Customer has no contact details for channel: {}",
                reminder.channel
            );
            return fail_without_send(reminder, Some(garage), String::new(), error, ctx).await;
        }
    };

    let tokens = build_tokens(&garage, &customer, &vehicle, &reminder, &ctx.config.app_url);
    let body = render_template(&template.body, &tokens);
    let subject = match reminder.channel {
        Channel::Email => Some(match &template.subject {
            Some(subject) => render_template(subject, &tokens),
            None => format!("Reminder from {}", garage.name),
        }),
        _ => None,
    };

    reminder.mark_sending();
    if ctx.repos.reminders.save(&reminder).await.is_err() {
        // Could not claim the row; leave it for the next run
        return false;
    }

    let outcome = ctx
        .sender
        .send(reminder.channel, &recipient, subject.as_deref(), &body)
        .await;

    let success = outcome.success;
    if success {
        reminder.mark_sent(ctx.sys.get_utc_datetime());
    } else {
        reminder.mark_failed(
            outcome
                .error
                .clone()
                .unwrap_or_else(|| "Send failed".to_string()),
        );
    }
    // The status write is the source of truth and goes first: losing the
    // audit row is recoverable, a re-send is not
    if let Err(e) = ctx.repos.reminders.save(&reminder).await {
        error!(
            "Unable to resolve reminder: {} after send. Error: {:?}",
            reminder.id, e
        );
    }

    let log = MessageLog {
        id: Default::default(),
        garage_id: reminder.garage_id.clone(),
        customer_id: Some(reminder.customer_id.clone()),
        vehicle_id: Some(reminder.vehicle_id.clone()),
        scheduled_reminder_id: Some(reminder.id.clone()),
        channel: reminder.channel,
        recipient,
        template_id: reminder.template_id.clone(),
        subject,
        body,
        status: if success {
            DeliveryStatus::Delivered
        } else {
            DeliveryStatus::Failed
        },
        provider_message_id: outcome.provider_message_id,
        error_message: outcome.error,
        sent_at: ctx.sys.get_utc_datetime(),
    };
    if let Err(e) = ctx.repos.message_logs.insert(&log).await {
        error!(
            "Unable to write message log for reminder: {}. Error: {:?}",
            reminder.id, e
        );
    }

    success
}

/// Resolves a reminder that failed before any provider was called, still
/// leaving an audit row so the failure shows up in the messages view.
async fn fail_without_send(
    mut reminder: ScheduledReminder,
    garage: Option<Garage>,
    recipient: String,
    error: String,
    ctx: &GarageAlertContext,
) -> bool {
    warn!("Reminder: {} failed without send: {}", reminder.id, error);
    reminder.mark_failed(error.clone());
    if let Err(e) = ctx.repos.reminders.save(&reminder).await {
        error!("Unable to fail reminder: {}. Error: {:?}", reminder.id, e);
    }

    // Without a garage there is no tenant to file the audit row under
    if let Some(garage) = garage {
        let log = MessageLog {
            id: Default::default(),
            garage_id: garage.id,
            customer_id: Some(reminder.customer_id.clone()),
            vehicle_id: Some(reminder.vehicle_id.clone()),
            scheduled_reminder_id: Some(reminder.id.clone()),
            channel: reminder.channel,
            recipient,
            template_id: reminder.template_id.clone(),
            subject: None,
            body: String::new(),
            status: DeliveryStatus::Failed,
            provider_message_id: None,
            error_message: Some(error),
            sent_at: ctx.sys.get_utc_datetime(),
        };
        if let Err(e) = ctx.repos.message_logs.insert(&log).await {
            error!(
                "Unable to write message log for reminder: {}. Error: {:?}",
                reminder.id, e
            );
        }
    }

    false
}

fn build_tokens(
    garage: &Garage,
    customer: &Customer,
    vehicle: &Vehicle,
    reminder: &ScheduledReminder,
    app_url: &str,
) -> std::collections::HashMap<String, String> {
    TemplateTokens {
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        vehicle_reg: vehicle.registration.clone(),
        due_date: vehicle
            .due_date_for(reminder.reminder_type)
            .map(format_date_uk)
            .unwrap_or_default(),
        garage_name: garage.name.clone(),
        garage_phone: garage.phone.clone().unwrap_or_default(),
        unsubscribe_link: format!("{}/unsubscribe/{}", app_url, customer.id),
    }
    .into_map()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::generate_reminders::GenerateRemindersUseCase;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use garagealert_domain::{MessageTemplate, ReminderSchedule, ReminderStatus, ReminderType, ID};
    use garagealert_infra::{ISys, StubChannelSender};
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
        sender: Arc<StubChannelSender>,
        garage: Garage,
        customer: Customer,
    }

    async fn setup() -> TestContext {
        let mut ctx = GarageAlertContext::create_inmemory();
        ctx.sys = Arc::new(StaticSys { date: today() });
        let sender = Arc::new(StubChannelSender::new());
        ctx.sender = sender.clone();

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
            "MOT due {due_date}".into(),
        );
        ctx.repos.templates.insert(&template).await.unwrap();

        TestContext {
            ctx,
            sender,
            garage,
            customer,
        }
    }

    async fn generate(ctx: &GarageAlertContext) -> usize {
        execute(GenerateRemindersUseCase { today: today() }, ctx)
            .await
            .unwrap()
            .created
    }

    async fn dispatch(ctx: &GarageAlertContext) -> UseCaseRes {
        execute(DispatchRemindersUseCase { today: today() }, ctx)
            .await
            .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn it_sends_generated_reminders_end_to_end() {
        let TestContext {
            ctx,
            sender,
            garage,
            ..
        } = setup().await;

        assert_eq!(generate(&ctx).await, 1);

        let res = dispatch(&ctx).await;
        assert_eq!(res.sent, 1);
        assert_eq!(res.failed, 0);
        assert_eq!(res.total, 1);

        // Provider got a normalized recipient and a rendered body
        let messages = sender.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].channel, Channel::Sms);
        assert_eq!(messages[0].recipient, "07700 900000");
        assert_eq!(messages[0].body, "MOT due 12 Feb 2026");

        let reminders = ctx.repos.reminders.find_by_garage(&garage.id).await.unwrap();
        assert_eq!(reminders[0].status, ReminderStatus::Sent);
        assert!(reminders[0].sent_at.is_some());

        let logs = ctx
            .repos
            .message_logs
            .find_by_garage(&garage.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, DeliveryStatus::Delivered);
        assert_eq!(logs[0].body, "MOT due 12 Feb 2026");
        assert!(logs[0].provider_message_id.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn resolved_reminders_are_never_dispatched_again() {
        let TestContext { ctx, sender, .. } = setup().await;

        generate(&ctx).await;
        let first = dispatch(&ctx).await;
        assert_eq!(first.sent, 1);

        let second = dispatch(&ctx).await;
        assert_eq!(second.total, 0);
        assert_eq!(second.sent, 0);
        assert_eq!(sender.sent_count(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn provider_failures_resolve_to_failed_with_audit_row() {
        let mut test = setup().await;
        let sender = Arc::new(StubChannelSender::failing("provider down"));
        test.ctx.sender = sender.clone();

        generate(&test.ctx).await;
        let res = dispatch(&test.ctx).await;
        assert_eq!(res.sent, 0);
        assert_eq!(res.failed, 1);

        let reminders = test
            .ctx
            .repos
            .reminders
            .find_by_garage(&test.garage.id)
            .await
            .unwrap();
        assert_eq!(reminders[0].status, ReminderStatus::Failed);
        assert_eq!(reminders[0].error_message.as_deref(), Some("provider down"));

        let logs = test
            .ctx
            .repos
            .message_logs
            .find_by_garage(&test.garage.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, DeliveryStatus::Failed);
        assert_eq!(logs[0].error_message.as_deref(), Some("provider down"));
    }

    #[actix_web::main]
    #[test]
    async fn a_reminder_without_template_fails_visibly() {
        let test = setup().await;

        // Scheduled with no template reference
        let reminder = ScheduledReminder::new(
            test.garage.id.clone(),
            test.customer.id.clone(),
            ID::new(),
            ReminderType::Service,
            Channel::Sms,
            None,
            today(),
            Some(7),
        );
        test.ctx.repos.reminders.insert_if_absent(&reminder).await.unwrap();

        let res = dispatch(&test.ctx).await;
        assert_eq!(res.failed, 1);
        assert_eq!(test.sender.sent_count(), 0);

        let stored = test.ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.status, ReminderStatus::Failed);
        assert_eq!(stored.error_message.as_deref(), Some("Missing template"));

        let logs = test
            .ctx
            .repos
            .message_logs
            .find_by_garage(&test.garage.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, DeliveryStatus::Failed);
    }

    #[actix_web::main]
    #[test]
    async fn a_customer_without_contact_details_fails_that_reminder_only() {
        let test = setup().await;

        // Second customer with no phone on file but a due vehicle
        let mut customer2 =
            Customer::new(test.garage.id.clone(), "Joe".into(), "Bloggs".into());
        customer2.phone = Some("07700 900001".into());
        test.ctx.repos.customers.insert(&customer2).await.unwrap();
        let mut vehicle2 = Vehicle::new(
            customer2.id.clone(),
            test.garage.id.clone(),
            "CD34EFG".into(),
        );
        vehicle2.mot_due_date = Some(today() + Duration::days(30));
        test.ctx.repos.vehicles.insert(&vehicle2).await.unwrap();

        assert_eq!(generate(&test.ctx).await, 2);

        // Drop the phone before dispatch
        customer2.phone = None;
        test.ctx.repos.customers.save(&customer2).await.unwrap();

        let res = dispatch(&test.ctx).await;
        assert_eq!(res.sent, 1);
        assert_eq!(res.failed, 1);
        assert_eq!(res.total, 2);
    }

    #[actix_web::main]
    #[test]
    async fn email_reminders_get_a_default_subject() {
        let mut test = setup().await;

        test.customer.email = Some("jane@example.com".into());
        test.customer.preferred_channel = Channel::Email;
        test.ctx.repos.customers.save(&test.customer).await.unwrap();

        // Email template without a subject of its own
        let template = MessageTemplate::new(
            test.garage.id.clone(),
            ReminderType::Mot,
            Channel::Email,
            "30 day MOT email".into(),
            "MOT due {due_date}. Unsubscribe: {unsubscribe_link}".into(),
        );
        test.ctx.repos.templates.insert(&template).await.unwrap();

        generate(&test.ctx).await;
        let res = dispatch(&test.ctx).await;
        assert_eq!(res.sent, 1);

        let messages = test.sender.sent_messages();
        assert_eq!(messages[0].channel, Channel::Email);
        assert_eq!(messages[0].recipient, "jane@example.com");
        assert_eq!(
            messages[0].subject.as_deref(),
            Some("Reminder from Speedy Motors")
        );
        assert!(messages[0]
            .body
            .contains(&format!("/unsubscribe/{}", test.customer.id)));
    }

    #[actix_web::main]
    #[test]
    async fn stuck_sending_rows_from_earlier_dates_are_reclaimed() {
        let test = setup().await;

        let mut stuck = ScheduledReminder::new(
            test.garage.id.clone(),
            test.customer.id.clone(),
            ID::new(),
            ReminderType::Mot,
            Channel::Sms,
            None,
            today() - Duration::days(1),
            Some(30),
        );
        stuck.mark_sending();
        test.ctx.repos.reminders.insert_if_absent(&stuck).await.unwrap();

        let res = dispatch(&test.ctx).await;
        assert_eq!(res.reclaimed, 1);
        assert_eq!(res.total, 0);

        let stored = test.ctx.repos.reminders.find(&stuck.id).await.unwrap();
        assert_eq!(stored.status, ReminderStatus::Failed);
        assert_eq!(
            stored.error_message.as_deref(),
            Some(STUCK_SENDING_ERROR)
        );
    }

    #[actix_web::main]
    #[test]
    async fn a_run_processes_at_most_the_batch_cap() {
        let test = setup().await;

        for _ in 0..(DISPATCH_BATCH_SIZE as usize + 2) {
            let reminder = ScheduledReminder::new(
                test.garage.id.clone(),
                test.customer.id.clone(),
                ID::new(),
                ReminderType::Mot,
                Channel::Sms,
                None,
                today(),
                Some(30),
            );
            test.ctx.repos.reminders.insert_if_absent(&reminder).await.unwrap();
        }

        let res = dispatch(&test.ctx).await;
        assert_eq!(res.total, DISPATCH_BATCH_SIZE as usize);

        // The overflow is still pending for a follow-up run
        let res = dispatch(&test.ctx).await;
        assert_eq!(res.total, 2);
    }
}
