use crate::{
    error::AlertError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use garagealert_api_structs::create_garage::{APIResponse, RequestBody};
use garagealert_domain::Garage;
use garagealert_infra::GarageAlertContext;

pub async fn create_garage_controller(
    ctx: web::Data<GarageAlertContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, AlertError> {
    let body = body.0;
    let usecase = CreateGarageUseCase {
        code: body.code,
        name: body.name,
        phone: body.phone,
        email: body.email,
    };
    execute(usecase, &ctx)
        .await
        .map(|garage| HttpResponse::Created().json(APIResponse::new(garage)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct CreateGarageUseCase {
    code: String,
    name: String,
    phone: Option<String>,
    email: Option<String>,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    InvalidCreateGarageCode,
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCreateGarageCode => {
                Self::Unauthorized("Invalid code provided".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateGarageUseCase {
    type Response = Garage;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateGarage";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        if self.code != ctx.config.create_garage_secret_code {
            return Err(UseCaseError::InvalidCreateGarageCode);
        }
        let mut garage = Garage::new(self.name.clone());
        garage.phone = self.phone.take();
        garage.email = self.email.take();

        let res = ctx.repos.garages.insert(&garage).await;

        res.map(|_| garage).map_err(|_| UseCaseError::StorageError)
    }
}
