mod create_customer;
mod get_consents;
mod get_customers;
mod record_consent;
mod unsubscribe_customer;

use actix_web::web;
use create_customer::create_customer_controller;
use get_consents::get_consents_controller;
use get_customers::get_customers_controller;
use record_consent::record_consent_controller;
use unsubscribe_customer::unsubscribe_customer_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/customer", web::post().to(create_customer_controller));
    cfg.route("/customer", web::get().to(get_customers_controller));
    cfg.route(
        "/customer/{customer_id}/consent",
        web::post().to(record_consent_controller),
    );
    cfg.route(
        "/customer/{customer_id}/consent",
        web::get().to(get_consents_controller),
    );
    cfg.route(
        "/unsubscribe/{customer_id}",
        web::post().to(unsubscribe_customer_controller),
    );
}
