mod dispatch_reminders;
mod generate_reminders;
mod get_reminders;

use actix_web::web;
use dispatch_reminders::dispatch_reminders_controller;
use generate_reminders::generate_reminders_controller;
use get_reminders::get_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminder", web::get().to(get_reminders_controller));
    cfg.route(
        "/cron/generate-reminders",
        web::get().to(generate_reminders_controller),
    );
    cfg.route(
        "/cron/dispatch-reminders",
        web::get().to(dispatch_reminders_controller),
    );
}
