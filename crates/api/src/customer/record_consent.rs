use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::dtos::ConsentRecordDTO;
use garagealert_api_structs::record_consent::{APIResponse, PathParams, RequestBody};
use garagealert_domain::{Channel, ConsentMethod, ConsentRecord, ConsentStatus, ID};
use garagealert_infra::GarageAlertContext;

/// Staff-recorded consent change. Always appends a new record; history is
/// never rewritten.
pub async fn record_consent_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let usecase = RecordConsentUseCase {
        garage_id: garage.id,
        customer_id: path_params.customer_id.clone(),
        channel: body.0.channel,
        status: body.0.status,
    };
    execute(usecase, &ctx)
        .await
        .map(|record| {
            HttpResponse::Created().json(APIResponse {
                consent: ConsentRecordDTO::new(&record),
            })
        })
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct RecordConsentUseCase {
    garage_id: ID,
    customer_id: ID,
    channel: Channel,
    status: ConsentStatus,
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
impl UseCase for RecordConsentUseCase {
    type Response = ConsentRecord;

    type Error = UseCaseError;

    const NAME: &'static str = "RecordConsent";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .filter(|c| c.garage_id == self.garage_id)
            .ok_or_else(|| UseCaseError::CustomerNotFound(self.customer_id.clone()))?;

        let record = ConsentRecord::new(
            customer.id,
            self.channel,
            self.status,
            ConsentMethod::Staff,
            ctx.sys.get_utc_datetime(),
        );

        ctx.repos
            .consents
            .insert(&record)
            .await
            .map(|_| record)
            .map_err(|_| UseCaseError::StorageError)
    }
}
