use crate::{error::AlertError, shared::auth::protect_garage_route};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::get_garage::APIResponse;
use garagealert_infra::GarageAlertContext;

pub async fn get_garage_controller(
    http_req: HttpRequest,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;
    Ok(HttpResponse::Ok().json(APIResponse::new(&garage)))
}
