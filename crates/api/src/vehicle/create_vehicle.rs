use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use garagealert_api_structs::create_vehicle::{APIResponse, RequestBody};
use garagealert_domain::{Vehicle, ID};
use garagealert_infra::GarageAlertContext;

pub async fn create_vehicle_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateVehicleUseCase {
        garage_id: garage.id,
        customer_id: body.customer_id,
        registration: body.registration,
        make: body.make,
        model: body.model,
        mot_due_date: body.mot_due_date,
        next_service_date: body.next_service_date,
        tyre_check_due_date: body.tyre_check_due_date,
        repair_followup_date: body.repair_followup_date,
    };
    execute(usecase, &ctx)
        .await
        .map(|vehicle| HttpResponse::Created().json(APIResponse::new(&vehicle)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct CreateVehicleUseCase {
    garage_id: ID,
    customer_id: ID,
    registration: String,
    make: Option<String>,
    model: Option<String>,
    mot_due_date: Option<NaiveDate>,
    next_service_date: Option<NaiveDate>,
    tyre_check_due_date: Option<NaiveDate>,
    repair_followup_date: Option<NaiveDate>,
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
impl UseCase for CreateVehicleUseCase {
    type Response = Vehicle;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateVehicle";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        // The vehicle must land under the same garage as its customer
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .filter(|c| c.garage_id == self.garage_id)
            .ok_or_else(|| UseCaseError::CustomerNotFound(self.customer_id.clone()))?;

        let mut vehicle = Vehicle::new(
            customer.id,
            self.garage_id.clone(),
            self.registration.trim().to_uppercase(),
        );
        vehicle.make = self.make.take();
        vehicle.model = self.model.take();
        vehicle.mot_due_date = self.mot_due_date;
        vehicle.next_service_date = self.next_service_date;
        vehicle.tyre_check_due_date = self.tyre_check_due_date;
        vehicle.repair_followup_date = self.repair_followup_date;

        ctx.repos
            .vehicles
            .insert(&vehicle)
            .await
            .map(|_| vehicle)
            .map_err(|_| UseCaseError::StorageError)
    }
}
