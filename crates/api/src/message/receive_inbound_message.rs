use crate::{
    error::AlertError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use garagealert_api_structs::receive_inbound_message::RequestBody;
use garagealert_domain::{format_uk_phone, Channel, ConsentMethod, ConsentRecord};
use garagealert_infra::GarageAlertContext;
use tracing::info;

const STOP_KEYWORDS: [&str; 4] = ["STOP", "UNSUBSCRIBE", "CANCEL", "QUIT"];

const TWIML_EMPTY_RESPONSE: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response></Response>";

/// Inbound sms/whatsapp webhook from the messaging provider. A STOP-style
/// keyword appends an opt-out consent record scoped to the channel the
/// message arrived on. Always answers with empty TwiML.
pub async fn receive_inbound_message_controller(
    body: web::Form<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let body = body.0;
    let usecase = ReceiveInboundMessageUseCase {
        from: body.from,
        body: body.body,
    };
    execute(usecase, &ctx).await.map_err(AlertError::from)?;

    Ok(HttpResponse::Ok()
        .content_type("text/xml")
        .body(TWIML_EMPTY_RESPONSE))
}

#[derive(Debug)]
pub struct ReceiveInboundMessageUseCase {
    pub from: String,
    pub body: String,
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
    pub opted_out: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReceiveInboundMessageUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ReceiveInboundMessage";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let keyword = self.body.trim().to_uppercase();
        if !STOP_KEYWORDS.contains(&keyword.as_str()) {
            return Ok(UseCaseRes { opted_out: 0 });
        }

        let (channel, phone) = match self.from.strip_prefix("whatsapp:") {
            Some(rest) => (Channel::Whatsapp, rest),
            None => (Channel::Sms, self.from.as_str()),
        };

        // Providers deliver E.164 while customers are usually stored in
        // local 07... format, so try both spellings
        let normalized = format_uk_phone(phone);
        let local = normalized.replacen("+44", "0", 1);
        let mut customers = ctx
            .repos
            .customers
            .find_by_phone(&normalized)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if customers.is_empty() {
            customers = ctx
                .repos
                .customers
                .find_by_phone(&local)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        let collected_at = ctx.sys.get_utc_datetime();
        for customer in &customers {
            let record = ConsentRecord::opt_out(
                customer.id.clone(),
                channel,
                ConsentMethod::StopKeyword,
                collected_at,
            );
            ctx.repos
                .consents
                .insert(&record)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        info!(
            "Inbound {} keyword opted out {} customers",
            keyword,
            customers.len()
        );
        Ok(UseCaseRes {
            opted_out: customers.len(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use garagealert_domain::{sending_allowed, Customer};

    async fn setup_customer(ctx: &GarageAlertContext, phone: &str) -> Customer {
        let mut customer = Customer::new(Default::default(), "Jane".into(), "Doe".into());
        customer.phone = Some(phone.into());
        ctx.repos.customers.insert(&customer).await.unwrap();
        customer
    }

    async fn run(ctx: &GarageAlertContext, from: &str, body: &str) -> UseCaseRes {
        let usecase = ReceiveInboundMessageUseCase {
            from: from.into(),
            body: body.into(),
        };
        execute(usecase, ctx).await.unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn stop_keyword_opts_out_the_sms_channel_only() {
        let ctx = GarageAlertContext::create_inmemory();
        let customer = setup_customer(&ctx, "+447700900000").await;

        let res = run(&ctx, "+447700900000", "STOP").await;
        assert_eq!(res.opted_out, 1);

        let sms = ctx.repos.consents.find_latest(&customer.id, Channel::Sms).await;
        assert!(!sending_allowed(sms.as_ref()));
        let whatsapp = ctx
            .repos
            .consents
            .find_latest(&customer.id, Channel::Whatsapp)
            .await;
        assert!(sending_allowed(whatsapp.as_ref()));
    }

    #[actix_web::main]
    #[test]
    async fn whatsapp_prefix_scopes_the_opt_out_to_whatsapp() {
        let ctx = GarageAlertContext::create_inmemory();
        let customer = setup_customer(&ctx, "+447700900000").await;

        let res = run(&ctx, "whatsapp:+447700900000", "stop").await;
        assert_eq!(res.opted_out, 1);

        let whatsapp = ctx
            .repos
            .consents
            .find_latest(&customer.id, Channel::Whatsapp)
            .await;
        assert!(!sending_allowed(whatsapp.as_ref()));
        let sms = ctx.repos.consents.find_latest(&customer.id, Channel::Sms).await;
        assert!(sending_allowed(sms.as_ref()));
    }

    #[actix_web::main]
    #[test]
    async fn locally_formatted_stored_numbers_still_match() {
        let ctx = GarageAlertContext::create_inmemory();
        let customer = setup_customer(&ctx, "07700900000").await;

        // Provider sends E.164; the fallback lookup finds the local spelling
        let res = run(&ctx, "+447700900000", "UNSUBSCRIBE").await;
        assert_eq!(res.opted_out, 1);
        let sms = ctx.repos.consents.find_latest(&customer.id, Channel::Sms).await;
        assert!(!sending_allowed(sms.as_ref()));
    }

    #[actix_web::main]
    #[test]
    async fn ordinary_replies_change_nothing() {
        let ctx = GarageAlertContext::create_inmemory();
        let customer = setup_customer(&ctx, "+447700900000").await;

        let res = run(&ctx, "+447700900000", "Thanks, see you then!").await;
        assert_eq!(res.opted_out, 0);

        let sms = ctx.repos.consents.find_latest(&customer.id, Channel::Sms).await;
        assert!(sending_allowed(sms.as_ref()));
    }
}
