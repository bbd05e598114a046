mod clock_capability;
mod person_capability;

use crate::{db, nice_display::NiceDisplay};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::Postgres;
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Worker {
    pub sqlx: sqlx::Pool<Postgres>,
}

#[derive(Debug)]
pub enum InitError {
    PoolConnection(sqlx::Error),
    PoolAcquire(sqlx::Error),
}

impl NiceDisplay for InitError {
    fn message(&self) -> String {
        match self {
            InitError::PoolConnection(err) => {
                format!("Error connecting to the database pool\n{}", err)
            }
            InitError::PoolAcquire(err) => {
                format!(
                    "Error acquiring a database connection from the pool\n{}",
                    err
                )
            }
        }
    }
}

impl Worker {
    pub async fn new(db_info: &db::Config) -> Result<Self, InitError> {
        let sqlx_pool = {
            let connect_options = PgConnectOptions::new()
                .host(&db_info.host)
                .port(db_info.port)
                .username(&db_info.user)
                .password(&db_info.password)
                .database(&db_info.name);

            PgPoolOptions::new()
                .min_connections(2)
                .idle_timeout(Duration::from_secs(600))
                .acquire_timeout(Duration::from_secs(5))
                .max_connections(19)
                .test_before_acquire(true)
                .connect_with(connect_options)
                .await
                .map_err(InitError::PoolConnection)?
        };

        sqlx::query("SELECT 1")
            .execute(&sqlx_pool)
            .await
            .map_err(InitError::PoolAcquire)?;

        debug!(
            host = %db_info.host,
            port = db_info.port,
            user = %db_info.user,
            dbname = %db_info.name,
            "Database connection initialized"
        );

        Ok(Worker { sqlx: sqlx_pool })
    }

    pub async fn close(&self) {
        self.sqlx.close().await;
    }
}
