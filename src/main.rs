mod capability;
mod db;
mod domain;
mod handlers;
mod logging;
mod migrations;
mod nice_display;
#[cfg(test)]
mod test_worker;
mod worker;

use crate::nice_display::NiceDisplay;
use crate::worker::Worker;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1",
    about = "Remembers birthdays and counts down to the next one"
)]
enum Cmd {
    Run,
    NewMigration { migration_name: String },
    RunMigrations,
}

enum Error {
    ActixWeb(WebServerError),
    NewMigration(migrations::Error),
    RunMigrations(migrations::Error),
    EnvVars(dotenv::Error),
    DbConfig(db::ConfigError),
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::ActixWeb(err) => err.message(),
            Error::NewMigration(err) => err.message(),
            Error::RunMigrations(err) => err.message(),
            Error::EnvVars(err) => {
                format!("Error loading environment variables: {}", err)
            }
            Error::DbConfig(err) => err.message(),
        }
    }
}

#[actix_web::main]
async fn main() -> Result<(), String> {
    nice_main()
        .await
        .map_err(|err| err.to_nice_error().to_string())
}

async fn nice_main() -> Result<(), Error> {
    if !db::is_production() {
        dotenv::dotenv().map_err(Error::EnvVars)?;
    }

    let _log_guard = logging::init();

    let cmd = Cmd::parse();

    match cmd {
        Cmd::Run => {
            let config = db::Config::load().map_err(Error::DbConfig)?;
            run_server(config).await.map_err(Error::ActixWeb)
        }
        Cmd::NewMigration { migration_name } => migrations::new(migration_name)
            .await
            .map_err(Error::NewMigration),
        Cmd::RunMigrations => {
            let config = db::Config::load().map_err(Error::DbConfig)?;
            migrations::run(&config, migrations::Confirmation::Ask)
                .await
                .map_err(Error::RunMigrations)
        }
    }
}

enum WebServerError {
    HttpPort(db::HttpPortError),
    Migrations(migrations::Error),
    WorkerInit(worker::InitError),
    Bind(std::io::Error),
    Run(std::io::Error),
}

impl NiceDisplay for WebServerError {
    fn message(&self) -> String {
        match self {
            WebServerError::HttpPort(err) => err.message(),
            WebServerError::Migrations(err) => {
                format!("Error migrating the database\n{}", err.message())
            }
            WebServerError::WorkerInit(err) => {
                format!("Worker initialization error\n{}", err.message())
            }
            WebServerError::Run(err) => format!("Error running server: {}", err),
            WebServerError::Bind(err) => {
                format!("Error binding server: {}", err)
            }
        }
    }
}

async fn run_server(config: db::Config) -> Result<(), WebServerError> {
    let port = db::http_port().map_err(WebServerError::HttpPort)?;

    migrations::run(&config, migrations::Confirmation::Skip)
        .await
        .map_err(WebServerError::Migrations)?;

    let worker = Worker::new(&config)
        .await
        .map_err(WebServerError::WorkerInit)?;

    let worker_data = web::Data::new(worker.clone());

    info!("Starting server on port {}", port);

    // actix-web stops gracefully on SIGINT and SIGTERM.
    let result = HttpServer::new(move || {
        App::new()
            .app_data(worker_data.clone())
            .wrap(middleware::from_fn(logging::log_request))
            .configure(handlers::routes::<Worker>)
    })
    .client_request_timeout(Duration::from_secs(10))
    .bind(("0.0.0.0", port))
    .map_err(WebServerError::Bind)?
    .run()
    .await
    .map_err(WebServerError::Run);

    worker.close().await;
    info!("Database connection closed");

    result
}
