mod create_schedule;
mod get_schedules;

use actix_web::web;
use create_schedule::create_schedule_controller;
use get_schedules::get_schedules_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule", web::post().to(create_schedule_controller));
    cfg.route("/schedule", web::get().to(get_schedules_controller));
}
