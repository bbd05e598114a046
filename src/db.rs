use crate::nice_display::NiceDisplay;
use std::num::ParseIntError;

const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug)]
pub enum ConfigError {
    ReadingHost(dotenv::Error),
    ReadingPort(dotenv::Error),
    ParsingPort(ParseIntError),
    ReadingUser(dotenv::Error),
    ReadingPassword(dotenv::Error),
    ReadingName(dotenv::Error),
}

impl NiceDisplay for ConfigError {
    fn message(&self) -> String {
        match self {
            ConfigError::ReadingHost(err) => format!("Error reading DB_HOST: {}", err),
            ConfigError::ReadingPort(err) => format!("Error reading DB_PORT: {}", err),
            ConfigError::ParsingPort(err) => format!("DB_PORT is not a valid port: {}", err),
            ConfigError::ReadingUser(err) => format!("Error reading DB_USER: {}", err),
            ConfigError::ReadingPassword(err) => format!("Error reading DB_PASSWORD: {}", err),
            ConfigError::ReadingName(err) => format!("Error reading DB_NAME: {}", err),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        let host = required_var("DB_HOST").map_err(ConfigError::ReadingHost)?;
        let port = required_var("DB_PORT")
            .map_err(ConfigError::ReadingPort)?
            .parse::<u16>()
            .map_err(ConfigError::ParsingPort)?;
        let user = required_var("DB_USER").map_err(ConfigError::ReadingUser)?;
        let password = required_var("DB_PASSWORD").map_err(ConfigError::ReadingPassword)?;
        let name = required_var("DB_NAME").map_err(ConfigError::ReadingName)?;

        Ok(Config {
            host,
            port,
            user,
            password,
            name,
        })
    }
}

// An empty value counts as unset.
fn required_var(key: &str) -> Result<String, dotenv::Error> {
    match dotenv::var(key) {
        Ok(value) if value.is_empty() => {
            Err(dotenv::Error::EnvVar(std::env::VarError::NotPresent))
        }
        other => other,
    }
}

#[derive(Debug)]
pub enum HttpPortError {
    Parsing { value: String, err: ParseIntError },
}

impl NiceDisplay for HttpPortError {
    fn message(&self) -> String {
        match self {
            HttpPortError::Parsing { value, err } => {
                format!("PORT '{}' is not a valid port: {}", value, err)
            }
        }
    }
}

pub fn http_port() -> Result<u16, HttpPortError> {
    match dotenv::var("PORT") {
        Ok(value) if !value.is_empty() => value
            .parse::<u16>()
            .map_err(|err| HttpPortError::Parsing { value, err }),
        _ => Ok(DEFAULT_HTTP_PORT),
    }
}

/// Outside of production the `.env` file is mandatory.
pub fn is_production() -> bool {
    std::env::var("ENVIRONMENT").map_or(false, |env| env == "PRODUCTION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const DB_VARS: [(&str, &str); 5] = [
        ("DB_HOST", "localhost"),
        ("DB_PORT", "5432"),
        ("DB_USER", "greeter"),
        ("DB_PASSWORD", "hunter2"),
        ("DB_NAME", "greeter"),
    ];

    fn set_all() {
        for (key, value) in DB_VARS {
            std::env::set_var(key, value);
        }
    }

    #[test]
    #[serial]
    fn loads_when_every_variable_is_set() {
        set_all();

        let config = Config::load().unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "greeter");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.name, "greeter");
    }

    #[test]
    #[serial]
    fn each_missing_variable_is_named() {
        for (missing, _) in DB_VARS {
            set_all();
            std::env::remove_var(missing);

            let err = Config::load().unwrap_err();
            assert!(
                err.message().contains(missing),
                "expected '{}' in '{}'",
                missing,
                err.message()
            );
        }
    }

    #[test]
    #[serial]
    fn empty_variable_counts_as_missing() {
        set_all();
        std::env::set_var("DB_PASSWORD", "");

        assert!(matches!(
            Config::load(),
            Err(ConfigError::ReadingPassword(_))
        ));
    }

    #[test]
    #[serial]
    fn non_numeric_db_port_is_rejected() {
        set_all();
        std::env::set_var("DB_PORT", "postgres");

        assert!(matches!(Config::load(), Err(ConfigError::ParsingPort(_))));
    }

    #[test]
    #[serial]
    fn http_port_defaults_and_parses() {
        std::env::remove_var("PORT");
        assert_eq!(http_port().unwrap(), 8080);

        std::env::set_var("PORT", "3000");
        assert_eq!(http_port().unwrap(), 3000);

        std::env::set_var("PORT", "eighty");
        assert!(http_port().is_err());

        std::env::remove_var("PORT");
    }
}
