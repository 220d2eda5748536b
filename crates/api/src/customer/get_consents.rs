use crate::{error::AlertError, shared::auth::protect_garage_route};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::get_consents::{APIResponse, PathParams};
use garagealert_infra::GarageAlertContext;

pub async fn get_consents_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let customer = ctx
        .repos
        .customers
        .find(&path_params.customer_id)
        .await
        .filter(|c| c.garage_id == garage.id)
        .ok_or_else(|| {
            AlertError::NotFound(format!(
                "The customer with id: {}, was not found.",
                path_params.customer_id
            ))
        })?;

    let consents = ctx
        .repos
        .consents
        .find_by_customer(&customer.id)
        .await
        .map_err(|_| AlertError::InternalError)?;

    Ok(HttpResponse::Ok().json(APIResponse::new(&consents)))
}
