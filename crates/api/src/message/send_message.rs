use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::send_message::{APIResponse, RequestBody};
use garagealert_domain::{
    render_template, Channel, DeliveryStatus, Garage, MessageLog, TemplateTokens, ID,
};
use garagealert_infra::{GarageAlertContext, SendOutcome};

/// Ad-hoc single message to a customer, outside the reminder pipeline.
/// Uses the same token rendering, channel adapter and audit logging as
/// dispatched reminders.
pub async fn send_message_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = SendMessageUseCase {
        garage,
        customer_id: body.customer_id,
        channel: body.channel,
        subject: body.subject,
        body: body.body,
    };
    execute(usecase, &ctx)
        .await
        .map(|outcome| {
            HttpResponse::Ok().json(APIResponse {
                success: outcome.success,
                provider_message_id: outcome.provider_message_id,
                error: outcome.error,
            })
        })
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct SendMessageUseCase {
    garage: Garage,
    customer_id: ID,
    channel: Channel,
    subject: Option<String>,
    body: String,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    CustomerNotFound(ID),
    MissingContactForChannel(Channel),
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::CustomerNotFound(customer_id) => Self::NotFound(format!(
                "The customer with id: {}, was not found.",
                customer_id
            )),
            UseCaseError::MissingContactForChannel(channel) => Self::BadClientData(format!(
                "Customer has no contact details for channel: {}.",
                channel
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendMessageUseCase {
    type Response = SendOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendMessage";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .filter(|c| c.garage_id == self.garage.id)
            .ok_or_else(|| UseCaseError::CustomerNotFound(self.customer_id.clone()))?;

        let recipient = customer
            .contact_for_channel(self.channel)
            .ok_or(UseCaseError::MissingContactForChannel(self.channel))?
            .to_string();

        let tokens = TemplateTokens {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            garage_name: self.garage.name.clone(),
            garage_phone: self.garage.phone.clone().unwrap_or_default(),
            unsubscribe_link: format!("{}/unsubscribe/{}", ctx.config.app_url, customer.id),
            ..Default::default()
        }
        .into_map();

        let rendered_body = render_template(&self.body, &tokens);
        let subject = match self.channel {
            Channel::Email => Some(match &self.subject {
                Some(subject) => render_template(subject, &tokens),
                None => format!("Reminder from {}", self.garage.name),
            }),
            _ => None,
        };

        let outcome = ctx
            .sender
            .send(self.channel, &recipient, subject.as_deref(), &rendered_body)
            .await;

        let log = MessageLog {
            id: Default::default(),
            garage_id: self.garage.id.clone(),
            customer_id: Some(customer.id.clone()),
            vehicle_id: None,
            scheduled_reminder_id: None,
            channel: self.channel,
            recipient,
            template_id: None,
            subject,
            body: rendered_body,
            status: if outcome.success {
                DeliveryStatus::Delivered
            } else {
                DeliveryStatus::Failed
            },
            provider_message_id: outcome.provider_message_id.clone(),
            error_message: outcome.error.clone(),
            sent_at: ctx.sys.get_utc_datetime(),
        };
        ctx.repos
            .message_logs
            .insert(&log)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use garagealert_domain::Customer;
    use garagealert_infra::StubChannelSender;
    use std::sync::Arc;

    #[actix_web::main]
    #[test]
    async fn it_renders_sends_and_logs_the_message() {
        let mut ctx = GarageAlertContext::create_inmemory();
        let sender = Arc::new(StubChannelSender::new());
        ctx.sender = sender.clone();

        let garage = Garage::new("Speedy Motors".into());
        ctx.repos.garages.insert(&garage).await.unwrap();
        let mut customer = Customer::new(garage.id.clone(), "Jane".into(), "Doe".into());
        customer.phone = Some("07700 900000".into());
        ctx.repos.customers.insert(&customer).await.unwrap();

        let usecase = SendMessageUseCase {
            garage: garage.clone(),
            customer_id: customer.id.clone(),
            channel: Channel::Sms,
            subject: None,
            body: "Hi {first_name}, {garage_name} here".into(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(outcome.success);

        let messages = sender.sent_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "Hi Jane, Speedy Motors here");

        let logs = ctx.repos.message_logs.find_by_garage(&garage.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, DeliveryStatus::Delivered);
    }

    #[actix_web::main]
    #[test]
    async fn customers_of_other_garages_are_not_reachable() {
        let ctx = GarageAlertContext::create_inmemory();

        let garage = Garage::new("Speedy Motors".into());
        ctx.repos.garages.insert(&garage).await.unwrap();
        let other_garage = Garage::new("Other Motors".into());
        ctx.repos.garages.insert(&other_garage).await.unwrap();

        let mut customer = Customer::new(other_garage.id.clone(), "Jane".into(), "Doe".into());
        customer.phone = Some("07700 900000".into());
        ctx.repos.customers.insert(&customer).await.unwrap();

        let usecase = SendMessageUseCase {
            garage,
            customer_id: customer.id.clone(),
            channel: Channel::Sms,
            subject: None,
            body: "hello".into(),
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
