use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::set_subscription_status::{APIResponse, RequestBody};
use garagealert_domain::{Garage, SubscriptionStatus};
use garagealert_infra::GarageAlertContext;

/// Surface for the external billing collaborator: the only thing it ever
/// writes is the subscription-status flag.
pub async fn set_subscription_status_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let usecase = SetSubscriptionStatusUseCase {
        garage,
        subscription_status: body.0.subscription_status,
    };
    execute(usecase, &ctx)
        .await
        .map(|garage| HttpResponse::Ok().json(APIResponse::new(&garage)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct SetSubscriptionStatusUseCase {
    garage: Garage,
    subscription_status: SubscriptionStatus,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetSubscriptionStatusUseCase {
    type Response = Garage;

    type Error = UseCaseError;

    const NAME: &'static str = "SetSubscriptionStatus";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let mut garage = self.garage.clone();
        garage.subscription_status = self.subscription_status;

        ctx.repos
            .garages
            .save(&garage)
            .await
            .map(|_| garage)
            .map_err(|_| UseCaseError::StorageError)
    }
}
