use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::create_schedule::{APIResponse, RequestBody};
use garagealert_domain::{ReminderSchedule, ReminderType, ID};
use garagealert_infra::GarageAlertContext;

pub async fn create_schedule_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateScheduleUseCase {
        garage_id: garage.id,
        reminder_type: body.reminder_type,
        days_before: body.days_before,
        is_enabled: body.is_enabled.unwrap_or(true),
    };
    execute(usecase, &ctx)
        .await
        .map(|schedule| HttpResponse::Created().json(APIResponse::new(&schedule)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct CreateScheduleUseCase {
    garage_id: ID,
    reminder_type: ReminderType,
    days_before: i64,
    is_enabled: bool,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    UnreasonableOffset(i64),
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UnreasonableOffset(days_before) => Self::BadClientData(format!(
                "daysBefore: {} is outside the supported range of -365 to 365.",
                days_before
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateScheduleUseCase {
    type Response = ReminderSchedule;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSchedule";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        // Zero and negative offsets are valid ("on/after due"); a year out
        // in either direction is a typo
        if self.days_before.abs() > 365 {
            return Err(UseCaseError::UnreasonableOffset(self.days_before));
        }

        let mut schedule =
            ReminderSchedule::new(self.garage_id.clone(), self.reminder_type, self.days_before);
        schedule.is_enabled = self.is_enabled;

        ctx.repos
            .schedules
            .insert(&schedule)
            .await
            .map(|_| schedule)
            .map_err(|_| UseCaseError::StorageError)
    }
}
