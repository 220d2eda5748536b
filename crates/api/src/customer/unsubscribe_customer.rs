use crate::{
    error::AlertError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use garagealert_api_structs::unsubscribe_customer::{APIResponse, PathParams};
use garagealert_domain::{Channel, ConsentMethod, ConsentRecord, ID};
use garagealert_infra::GarageAlertContext;

/// Public one-time-token unsubscribe action reached from the
/// `{unsubscribe_link}` in every reminder message. Opts the customer out
/// of all channels by appending one opt-out record per channel.
pub async fn unsubscribe_customer_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let usecase = UnsubscribeCustomerUseCase {
        customer_id: path_params.customer_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "You have been unsubscribed from reminder messages.".into(),
            })
        })
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct UnsubscribeCustomerUseCase {
    customer_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    CustomerNotFound(ID),
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::CustomerNotFound(customer_id) => Self::NotFound(format!(
                "The customer with id: {}, was not found.",
                customer_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UnsubscribeCustomerUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "UnsubscribeCustomer";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .ok_or_else(|| UseCaseError::CustomerNotFound(self.customer_id.clone()))?;

        let collected_at = ctx.sys.get_utc_datetime();
        for channel in Channel::all().iter() {
            let record = ConsentRecord::opt_out(
                customer.id.clone(),
                *channel,
                ConsentMethod::UnsubscribeLink,
                collected_at,
            );
            ctx.repos
                .consents
                .insert(&record)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use garagealert_domain::{sending_allowed, Customer};

    #[actix_web::main]
    #[test]
    async fn it_opts_the_customer_out_of_every_channel() {
        let ctx = GarageAlertContext::create_inmemory();
        let mut customer = Customer::new(Default::default(), "Jane".into(), "Doe".into());
        customer.phone = Some("07700 900000".into());
        ctx.repos.customers.insert(&customer).await.unwrap();

        let usecase = UnsubscribeCustomerUseCase {
            customer_id: customer.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        for channel in Channel::all().iter() {
            let latest = ctx.repos.consents.find_latest(&customer.id, *channel).await;
            assert!(!sending_allowed(latest.as_ref()));
        }
    }

    #[actix_web::main]
    #[test]
    async fn unknown_customers_are_rejected() {
        let ctx = GarageAlertContext::create_inmemory();
        let usecase = UnsubscribeCustomerUseCase {
            customer_id: Default::default(),
        };
        assert!(execute(usecase, &ctx).await.is_err());
    }
}
