mod customer;
mod error;
mod garage;
mod message;
mod reminder;
mod schedule;
mod shared;
mod status;
mod template;
mod vehicle;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use garagealert_infra::GarageAlertContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    customer::configure_routes(cfg);
    garage::configure_routes(cfg);
    message::configure_routes(cfg);
    reminder::configure_routes(cfg);
    schedule::configure_routes(cfg);
    status::configure_routes(cfg);
    template::configure_routes(cfg);
    vehicle::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: GarageAlertContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(
        context: GarageAlertContext,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
