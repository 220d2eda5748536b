use crate::error::AlertError;
use actix_web::HttpRequest;
use garagealert_domain::Garage;
use garagealert_infra::GarageAlertContext;

fn parse_bearer_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

/// Guards the tenant CRUD surface: resolves the calling `Garage` from the
/// `x-api-key` header. Every handler behind this guard is implicitly
/// scoped to the returned garage.
pub async fn protect_garage_route(
    req: &HttpRequest,
    ctx: &GarageAlertContext,
) -> Result<Garage, AlertError> {
    let api_key = match req.headers().get("x-api-key") {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(AlertError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(AlertError::Unauthorized(
                "Unable to find api key in x-api-key header".to_string(),
            ))
        }
    };

    ctx.repos
        .garages
        .find_by_apikey(api_key)
        .await
        .ok_or_else(|| AlertError::Unauthorized("Invalid api key provided".to_string()))
}

/// Guards the cron trigger endpoints: the external scheduler presents the
/// shared secret as a Bearer token. A wrong or missing secret is rejected
/// before any work begins.
pub fn protect_cron_route(req: &HttpRequest, ctx: &GarageAlertContext) -> Result<(), AlertError> {
    let secret = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(parse_bearer_header);

    match secret {
        Some(secret) if secret == ctx.config.cron_secret => Ok(()),
        _ => Err(AlertError::Unauthorized(
            "Invalid cron secret provided".to_string(),
        )),
    }
}
