use crate::capability::clock::ClockCapability;
use crate::capability::person::PersonCapability;
use crate::domain::birthday::{birthday_message, days_until_birthday};
use crate::domain::person_name::PersonName;
use crate::handlers::INTERNAL_SERVER_ERROR;
use crate::nice_display::NiceDisplay;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct BirthdayMessage {
    pub message: String,
}

#[derive(Debug)]
pub enum Error {
    NotFound,
    Store,
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::NotFound => "User not found.".to_string(),
            Error::Store => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.message())
    }
}

pub async fn handler<W>(
    worker: web::Data<W>,
    username: web::Path<String>,
) -> Result<HttpResponse, Error>
where
    W: PersonCapability + ClockCapability + 'static,
{
    let username = username.into_inner();

    // A name that would not pass validation can never have been stored.
    let person_name = PersonName::parse(username.clone()).map_err(|_| {
        warn!(%username, "User not found");
        Error::NotFound
    })?;

    let person = worker
        .get_person_by_name(&person_name)
        .await
        .map_err(|details| {
            error!(%username, %details, "Error occurred while fetching person");
            Error::Store
        })?
        .ok_or_else(|| {
            warn!(%username, "User not found");
            Error::NotFound
        })?;

    let days = days_until_birthday(person.date_of_birth, worker.today());

    Ok(HttpResponse::Ok().json(BirthdayMessage {
        message: birthday_message(person.name.as_str(), days),
    }))
}
