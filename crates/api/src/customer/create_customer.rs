use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::create_customer::{APIResponse, RequestBody};
use garagealert_domain::{is_valid_uk_mobile, Channel, Customer, ID};
use garagealert_infra::GarageAlertContext;

pub async fn create_customer_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateCustomerUseCase {
        garage_id: garage.id,
        first_name: body.first_name,
        last_name: body.last_name,
        phone: body.phone,
        email: body.email,
        preferred_channel: body.preferred_channel,
        notes: body.notes,
    };
    execute(usecase, &ctx)
        .await
        .map(|customer| HttpResponse::Created().json(APIResponse::new(&customer)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct CreateCustomerUseCase {
    garage_id: ID,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    email: Option<String>,
    preferred_channel: Channel,
    notes: Option<String>,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    InvalidPhoneNumber(String),
    MissingContactForChannel(Channel),
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::InvalidPhoneNumber(phone) => Self::BadClientData(format!(
                "The phone number: {} is not a valid UK mobile number.",
                phone
            )),
            UseCaseError::MissingContactForChannel(channel) => Self::BadClientData(format!(
                "Customer has no contact details for the preferred channel: {}.",
                channel
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCustomerUseCase {
    type Response = Customer;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCustomer";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        if let Some(phone) = &self.phone {
            if !is_valid_uk_mobile(phone) {
                return Err(UseCaseError::InvalidPhoneNumber(phone.clone()));
            }
        }

        let mut customer = Customer::new(
            self.garage_id.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
        );
        customer.phone = self.phone.take();
        customer.email = self.email.take();
        customer.preferred_channel = self.preferred_channel;
        customer.notes = self.notes.take();

        // The preferred channel is unusable without a matching contact
        if customer.contact_for_channel(customer.preferred_channel).is_none() {
            return Err(UseCaseError::MissingContactForChannel(
                customer.preferred_channel,
            ));
        }

        ctx.repos
            .customers
            .insert(&customer)
            .await
            .map(|_| customer)
            .map_err(|_| UseCaseError::StorageError)
    }
}
