#[macro_use]
extern crate rocket;

pub mod adapter;
pub mod catchers;
pub mod configuration;
pub mod dashboard;
pub mod domain;
pub mod email;
pub mod models;
pub mod port_saver;
pub mod routes;
pub mod schema;
pub mod secrets;
pub mod startup;
pub mod telemetry;
