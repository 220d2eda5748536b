use crate::{
    error::AlertError,
    shared::{
        auth::protect_garage_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use garagealert_api_structs::create_template::{APIResponse, RequestBody};
use garagealert_domain::{Channel, MessageTemplate, ReminderType, ID};
use garagealert_infra::GarageAlertContext;

pub async fn create_template_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GarageAlertContext>,
) -> Result<HttpResponse, AlertError> {
    let garage = protect_garage_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateTemplateUseCase {
        garage_id: garage.id,
        reminder_type: body.reminder_type,
        channel: body.channel,
        name: body.name,
        subject: body.subject,
        body: body.body,
    };
    execute(usecase, &ctx)
        .await
        .map(|template| HttpResponse::Created().json(APIResponse::new(&template)))
        .map_err(AlertError::from)
}

#[derive(Debug)]
struct CreateTemplateUseCase {
    garage_id: ID,
    reminder_type: ReminderType,
    channel: Channel,
    name: String,
    subject: Option<String>,
    body: String,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
    EmptyBody,
}

impl From<UseCaseError> for AlertError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::EmptyBody => {
                Self::BadClientData("Template body cannot be empty.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTemplateUseCase {
    type Response = MessageTemplate;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTemplate";

    async fn execute(&mut self, ctx: &GarageAlertContext) -> Result<Self::Response, Self::Error> {
        if self.body.trim().is_empty() {
            return Err(UseCaseError::EmptyBody);
        }

        let mut template = MessageTemplate::new(
            self.garage_id.clone(),
            self.reminder_type,
            self.channel,
            self.name.clone(),
            self.body.clone(),
        );
        // Subject only means something for email templates
        if self.channel == Channel::Email {
            template.subject = self.subject.take();
        }

        ctx.repos
            .templates
            .insert(&template)
            .await
            .map(|_| template)
            .map_err(|_| UseCaseError::StorageError)
    }
}
