#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod timer;

pub use config::Config;

/// Build the audience API server, connecting to the database on ignition.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(config::ConfigFairing)
        .attach(config::DatabaseFairing)
        .attach(logging::LoggerFairing)
}

/// Build the server against an already-connected database.
#[cfg(test)]
pub(crate) fn rocket_for_db(db_client: mongodb::Client, db_name: &str) -> Rocket<Build> {
    let db = db_client.database(db_name);
    rocket::build()
        .mount("/", api::routes())
        .attach(config::ConfigFairing)
        .manage(db_client)
        .manage(db)
}

/// Connect to the configured test database server.
#[cfg(test)]
pub(crate) async fn db_client(db_uri: &str) -> mongodb::Client {
    mongodb::Client::with_uri_str(db_uri)
        .await
        .expect("Could not connect to the test database")
}
