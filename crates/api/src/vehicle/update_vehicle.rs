use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::update_vehicle::{APIResponse, PathParams, RequestBody};
use garagealert_domain::{Vehicle, ID};
use garagealert_infra::GarageAlertContext;

pub async fn update_vehicle_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let usecase = UpdateVehicleUseCase {
        garage_id: garage.id,
        vehicle_id: path_params.vehicle_id.clone(),
        changes: body.0,
    };
    execute(usecase, &ctx)
        .await
        .map(|vehicle| HttpResponse::Ok().json(APIResponse::new(&vehicle)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct UpdateVehicleUseCase {
    garage_id: ID,
    vehicle_id: ID,
    changes: RequestBody,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    VehicleNotFound(ID),
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::VehicleNotFound(vehicle_id) => Self::NotFound(format!(
                "The vehicle with id: {}, was not found.",
                vehicle_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateVehicleUseCase {
    type Response = Vehicle;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateVehicle";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        let mut vehicle = ctx
            .repos
            .vehicles
            .find(&self.vehicle_id)
            .await
            .filter(|v| v.garage_id == self.garage_id)
            .ok_or_else(|| UseCaseError::VehicleNotFound(self.vehicle_id.clone()))?;

        let changes = &self.changes;
        if let Some(registration) = &changes.registration {
            vehicle.registration = registration.trim().to_uppercase();
        }
        if let Some(make) = &changes.make {
            vehicle.make = Some(make.clone());
        }
        if let Some(model) = &changes.model {
            vehicle.model = Some(model.clone());
        }
        if let Some(mot_due_date) = changes.mot_due_date {
            vehicle.mot_due_date = mot_due_date;
        }
        if let Some(next_service_date) = changes.next_service_date {
            vehicle.next_service_date = next_service_date;
        }
        if let Some(tyre_check_due_date) = changes.tyre_check_due_date {
            vehicle.tyre_check_due_date = tyre_check_due_date;
        }
        if let Some(repair_followup_date) = changes.repair_followup_date {
            vehicle.repair_followup_date = repair_followup_date;
        }
        if let Some(enabled) = changes.mot_reminder_enabled {
            vehicle.mot_reminder_enabled = enabled;
        }
        if let Some(enabled) = changes.service_reminder_enabled {
            vehicle.service_reminder_enabled = enabled;
        }
        if let Some(enabled) = changes.tyre_reminder_enabled {
            vehicle.tyre_reminder_enabled = enabled;
        }
        if let Some(enabled) = changes.repair_reminder_enabled {
            vehicle.repair_reminder_enabled = enabled;
        }

        ctx.repos
            .vehicles
            .save(&vehicle)
            .await
            .map(|_| vehicle)
            .map_err(|_| UseCaseError::StorageError)
    }
}
