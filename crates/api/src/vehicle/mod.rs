mod create_vehicle;
mod get_vehicles;
mod update_vehicle;

use actix_web::web;
use create_vehicle::create_vehicle_controller;
use get_vehicles::get_vehicles_controller;
use update_vehicle::update_vehicle_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/vehicle", web::post().to(create_vehicle_controller));
    cfg.route("/vehicle", web::get().to(get_vehicles_controller));
    cfg.route(
        "/vehicle/{vehicle_id}",
        web::put().to(update_vehicle_controller),
    );
}
