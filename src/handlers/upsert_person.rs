use crate::capability::clock::ClockCapability;
use crate::capability::person::{CreatePersonError, NewPerson, PersonCapability};
use crate::domain::date_of_birth::{DateOfBirth, DateOfBirthError};
use crate::domain::person::Person;
use crate::domain::person_name::{NameError, PersonName};
use crate::domain::person_uuid::PersonUuid;
use crate::handlers::INTERNAL_SERVER_ERROR;
use crate::nice_display::NiceDisplay;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
struct UpsertBody {
    // A missing field, or a `null` body, fails date validation rather than body parsing.
    #[serde(rename = "dateOfBirth", default)]
    date_of_birth: String,
}

#[derive(Debug)]
pub enum Error {
    InvalidName(NameError),
    EmptyBody,
    InvalidBody,
    InvalidDateOfBirth(DateOfBirthError),
    Store(String),
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::InvalidName(err) => err.message(),
            Error::EmptyBody => "Request body cannot be empty.".to_string(),
            Error::InvalidBody => "Invalid request body.".to_string(),
            Error::InvalidDateOfBirth(err) => err.message(),
            Error::Store(_) => INTERNAL_SERVER_ERROR.to_string(),
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
            Error::InvalidName(err) => err.status_hint(),
            Error::EmptyBody | Error::InvalidBody | Error::InvalidDateOfBirth(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
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
    body: web::Bytes,
) -> Result<HttpResponse, Error>
where
    W: PersonCapability + ClockCapability + 'static,
{
    let username = username.into_inner();

    let person_name = PersonName::parse(username.clone()).map_err(|err| {
        warn!(%username, reason = %err.message(), "Invalid username");
        Error::InvalidName(err)
    })?;

    if body.is_empty() {
        warn!(%username, "Empty request body");
        return Err(Error::EmptyBody);
    }

    let upsert_body = serde_json::from_slice::<Option<UpsertBody>>(&body)
        .map_err(|err| {
            warn!(%username, %err, "Invalid request body");
            Error::InvalidBody
        })?
        .unwrap_or_default();

    let date_of_birth = DateOfBirth::parse(&upsert_body.date_of_birth, worker.today())
        .map_err(|err| {
            warn!(%username, reason = %err.reason(), "Invalid date of birth");
            Error::InvalidDateOfBirth(err)
        })?;

    upsert(worker.get_ref(), person_name, date_of_birth)
        .await
        .map_err(|err| {
            if let Error::Store(details) = &err {
                error!(%username, %details, "Error occurred while saving person");
            }
            err
        })?;

    Ok(HttpResponse::NoContent().finish())
}

async fn upsert<W: PersonCapability>(
    worker: &W,
    person_name: PersonName,
    date_of_birth: DateOfBirth,
) -> Result<(), Error> {
    if let Some(existing) = worker
        .get_person_by_name(&person_name)
        .await
        .map_err(Error::Store)?
    {
        return update(worker, &existing, date_of_birth).await;
    }

    let new_person = NewPerson {
        person_uuid: PersonUuid::new(),
        person_name: person_name.clone(),
        date_of_birth,
    };

    match worker.create_person(new_person).await {
        Ok(()) => {
            info!(username = %person_name, %date_of_birth, "New person created");
            Ok(())
        }
        // Someone else created this name since the lookup; theirs stands, ours overwrites it.
        Err(CreatePersonError::NameTaken) => {
            info!(username = %person_name, "Name taken by a concurrent create, updating instead");

            let existing = worker
                .get_person_by_name(&person_name)
                .await
                .map_err(Error::Store)?
                .ok_or_else(|| {
                    Error::Store(format!(
                        "Person {} was not found after a name conflict",
                        person_name
                    ))
                })?;

            update(worker, &existing, date_of_birth).await
        }
        Err(CreatePersonError::Store(err)) => Err(Error::Store(err)),
    }
}

async fn update<W: PersonCapability>(
    worker: &W,
    existing: &Person,
    date_of_birth: DateOfBirth,
) -> Result<(), Error> {
    worker
        .update_date_of_birth(existing, date_of_birth)
        .await
        .map_err(Error::Store)?;

    info!(
        username = %existing.name,
        previous = %existing.date_of_birth,
        %date_of_birth,
        "Person updated"
    );

    Ok(())
}
