mod get_messages;
mod receive_inbound_message;
mod send_message;

use actix_web::web;
use get_messages::get_messages_controller;
use receive_inbound_message::receive_inbound_message_controller;
use send_message::send_message_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/message", web::get().to(get_messages_controller));
    cfg.route("/message/send", web::post().to(send_message_controller));
    cfg.route(
        "/webhook/twilio",
        web::post().to(receive_inbound_message_controller),
    );
}
