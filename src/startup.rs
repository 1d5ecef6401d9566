use crate::adapter::Adapter;
use crate::catchers::*;
use crate::configuration::Settings;
use crate::dashboard;
use crate::port_saver;
use crate::port_saver::Port;
use crate::routes::*;
use rocket::config::LogLevel;
use rocket::{Config, Ignite, Rocket};

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    pub async fn build(settings: &Settings, adapter: Adapter) -> Result<Self, rocket::Error> {
        let (port_saver, port) = port_saver::create_pair();
        let config = Config {
            address: settings.application.host,
            port: settings.application.port.unwrap_or(0),
            // Requests are logged through tracing instead.
            log_level: LogLevel::Critical,
            ..Config::default()
        };
        let server = rocket::custom(config)
            .attach(port_saver)
            .manage(adapter)
            .mount(
                "/",
                routes![
                    index,
                    health_check,
                    db_conn_test,
                    create_schema_route,
                    add_user,
                    add_event,
                    get_events,
                    update_event,
                    delete_event,
                    subscribe_event,
                    get_subscribers,
                    get_user_events,
                ],
            )
            .mount("/dashboard", dashboard::routes())
            .register(
                "/",
                catchers![
                    unprocessable_entity_to_bad_request,
                    bad_request,
                    not_found,
                    default_catcher
                ],
            )
            .ignite()
            .await?;
        Ok(Self { server, port })
    }
}
