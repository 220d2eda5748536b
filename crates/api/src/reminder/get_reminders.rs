use crate::{error::AlertError, shared::auth::protect_garage_route};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::get_reminders::{APIResponse, QueryParams};
use garagealert_infra::GarageAlertContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let mut reminders = ctx
        .repos
        .reminders
        .find_by_garage(&garage.id)
        .await
        .map_err(|_| AlertError::InternalError)?;

    if let Some(status) = query_params.status {
        reminders.retain(|r| r.status == status);
    }
    if let Some(scheduled_for) = query_params.scheduled_for {
        reminders.retain(|r| r.scheduled_for == scheduled_for);
    }

    Ok(HttpResponse::Ok().json(APIResponse::new(&reminders)))
}
