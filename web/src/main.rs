#![warn(clippy::all)]

use std::env;
use std::io;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use store::{DataPaths, Store};

use crate::config::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    // Set up logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = Config::from_env();

    // Set up sentry
    let _guard = sentry::init(config.sentry_dsn.clone());

    // Load the store once; it is read-only from here on
    let store = Store::open(&DataPaths::in_dir(&config.data_dir)).map_err(|e| {
        error!("Could not load data from {}: {}", config.data_dir.display(), e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;
    let store = web::Data::new(store);

    info!("Listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(sentry_actix::Sentry::new())
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(controllers::routes::<Store>)
            .default_service(web::route().to(controllers::api::not_found))
    })
    .workers(config.workers)
    .bind(&config.bind_address)?
    .run()
    .await
}

mod config;
mod controllers;
mod error;
mod responder;
#[cfg(test)]
mod test;
