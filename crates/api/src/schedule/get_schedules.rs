use crate::{error::AlertError, shared::auth::protect_garage_route};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::get_schedules::APIResponse;
use garagealert_infra::GarageAlertContext;

pub async fn get_schedules_controller(
    http_req: HttpRequest,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let schedules = ctx
        .repos
        .schedules
        .find_by_garage(&garage.id)
        .await
        .map_err(|_| AlertError::InternalError)?;

    Ok(HttpResponse::Ok().json(APIResponse::new(&schedules)))
}
