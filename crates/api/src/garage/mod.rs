mod create_garage;
mod get_garage;
mod set_subscription_status;

use actix_web::web;
use create_garage::create_garage_controller;
use get_garage::get_garage_controller;
use set_subscription_status::set_subscription_status_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/garage", web::post().to(create_garage_controller));
    cfg.route("/garage", web::get().to(get_garage_controller));
    cfg.route(
        "/garage/subscription",
        web::put().to(set_subscription_status_controller),
    );
}
