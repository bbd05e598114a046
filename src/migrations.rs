use crate::db;
use crate::nice_display::NiceDisplay;
use chrono::NaiveDateTime;
use std::{fs, io};
use tokio_postgres::NoTls;
use tracing::{error, info};

const MIGRATIONS_DIR: &str = "./db/migrations";
const SEPARATOR: &str = "____";
const DATE_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

#[derive(Debug, PartialEq, Eq)]
struct Migration {
    file_name: String,
    timestamp: i64,
}

impl Migration {
    fn parse(file_name: String) -> Result<Self, Error> {
        let (stamp, rest) = match file_name.split_once(SEPARATOR) {
            Some(parts) => parts,
            None => return Err(Error::SplittingFileName { file_name }),
        };

        if rest.trim_end_matches(".sql").is_empty() {
            return Err(Error::SplittingFileName { file_name });
        }

        let timestamp = NaiveDateTime::parse_from_str(stamp, DATE_FORMAT)
            .map_err(|err| Error::ParsingDateFromFileName {
                file_name: file_name.clone(),
                err,
            })?
            .and_utc()
            .timestamp();

        Ok(Migration {
            file_name,
            timestamp,
        })
    }

    fn human_name(&self) -> &str {
        self.file_name
            .split_once(SEPARATOR)
            .map(|(_, name)| name.trim_end_matches(".sql"))
            .unwrap_or(self.file_name.as_str())
    }
}

#[derive(Debug)]
pub enum Error {
    WritingFile(io::Error),
    GettingMigrations(io::Error),
    ParsingDateFromFileName {
        file_name: String,
        err: chrono::ParseError,
    },
    ConnectingToDb(tokio_postgres::Error),
    ReadingMigrationFile(io::Error),
    ReadingConfirmation(io::Error),
    PreparingMigrationTable(tokio_postgres::Error),
    ExecutingMigration {
        file_name: String,
        err: tokio_postgres::Error,
    },
    SplittingFileName {
        file_name: String,
    },
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::WritingFile(err) => format!("Error writing migration file: {}", err),
            Error::GettingMigrations(err) => format!("Error getting migrations: {}", err),
            Error::ParsingDateFromFileName { file_name, err } => {
                format!("Error parsing date from file name '{}': {}", file_name, err)
            }
            Error::ConnectingToDb(err) => format!("Error connecting to database: {}", err),
            Error::ReadingMigrationFile(err) => format!("Error reading migration file: {}", err),
            Error::ReadingConfirmation(err) => format!("Error reading confirmation: {}", err),
            Error::PreparingMigrationTable(err) => {
                format!("Error preparing the migration table: {}", err)
            }
            Error::ExecutingMigration { file_name, err } => {
                format!("Error executing migration '{}': {}", file_name, err)
            }
            Error::SplittingFileName { file_name } => {
                format!("Error splitting file name '{}'", file_name)
            }
        }
    }
}

pub enum Confirmation {
    Ask,
    Skip,
}

pub async fn new(name: String) -> Result<(), Error> {
    let now = chrono::Utc::now().format(DATE_FORMAT).to_string();

    let new_migration_file_name = format!("{}{}{}.sql", now, SEPARATOR, name);

    fs::write(
        format!("{}/{}", MIGRATIONS_DIR, new_migration_file_name),
        r#"-- ${name}

BEGIN;
-- Write your migration here
COMMIT;"#
            .replace("${name}", name.as_str()),
    )
    .map_err(Error::WritingFile)?;

    Ok(())
}

/// Applies every migration in `db/migrations` that is not yet recorded in the
/// `migration` table, oldest first.
pub async fn run(config: &db::Config, confirmation: Confirmation) -> Result<(), Error> {
    let migrations = get_migrations()?;

    if let Confirmation::Ask = confirmation {
        println!(
            "Should I run migrations on database {} at {}:{}? (Y/n): ",
            config.name, config.host, config.port
        );

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(Error::ReadingConfirmation)?;

        if input.trim().to_uppercase() != "Y" {
            println!("Okay, I won't run the migrations");
            return Ok(());
        }
    }

    let (client, connection) = {
        let connect_string = format!(
            "host={} port={} user={} password={} dbname={}",
            config.host, config.port, config.user, config.password, config.name
        );

        tokio_postgres::connect(connect_string.as_str(), NoTls)
            .await
            .map_err(Error::ConnectingToDb)?
    };

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Migration connection error");
        }
    });

    client
        .batch_execute(
            r#"
                CREATE TABLE IF NOT EXISTS migration (
                    name TEXT PRIMARY KEY,
                    ran_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
            "#,
        )
        .await
        .map_err(Error::PreparingMigrationTable)?;

    let already_ran = client
        .query("SELECT name FROM migration;", &[])
        .await
        .map_err(Error::PreparingMigrationTable)?
        .iter()
        .map(|row| row.try_get::<_, String>("name"))
        .collect::<Result<Vec<String>, tokio_postgres::Error>>()
        .map_err(Error::PreparingMigrationTable)?;

    let pending = migrations
        .into_iter()
        .filter(|migration| !already_ran.contains(&migration.file_name))
        .collect::<Vec<Migration>>();
    let pending_len = pending.len();

    for (index, migration) in pending.into_iter().enumerate() {
        info!(
            "Running migration {}/{}, {}",
            index + 1,
            pending_len,
            migration.human_name()
        );

        let migration_file_content =
            fs::read_to_string(format!("{}/{}", MIGRATIONS_DIR, migration.file_name))
                .map_err(Error::ReadingMigrationFile)?;

        let executing_error = |err: tokio_postgres::Error| Error::ExecutingMigration {
            file_name: migration.file_name.clone(),
            err,
        };

        client
            .batch_execute(migration_file_content.as_str())
            .await
            .map_err(executing_error)?;

        client
            .execute(
                "INSERT INTO migration (name) VALUES ($1::TEXT);",
                &[&migration.file_name],
            )
            .await
            .map_err(executing_error)?;
    }

    if pending_len == 0 {
        info!("Database schema is already up to date, no migrations run");
    } else {
        info!("Ran {} migration(s)", pending_len);
    }

    Ok(())
}

fn get_migrations() -> Result<Vec<Migration>, Error> {
    let migration_dir_content = fs::read_dir(MIGRATIONS_DIR).map_err(Error::GettingMigrations)?;

    let mut file_names = Vec::new();
    for entry in migration_dir_content {
        let entry = entry.map_err(Error::GettingMigrations)?;
        let is_file = entry
            .file_type()
            .map_err(Error::GettingMigrations)?
            .is_file();
        let is_sql = entry.path().extension().and_then(|ext| ext.to_str()) == Some("sql");

        if is_file && is_sql {
            if let Some(file_name) = entry.file_name().to_str() {
                file_names.push(file_name.to_string());
            }
        }
    }

    sort_migrations(file_names)
}

fn sort_migrations(file_names: Vec<String>) -> Result<Vec<Migration>, Error> {
    let mut migrations = file_names
        .into_iter()
        .map(Migration::parse)
        .collect::<Result<Vec<Migration>, Error>>()?;

    migrations.sort_by(|m0, m1| m0.timestamp.cmp(&m1.timestamp));

    Ok(migrations)
}
