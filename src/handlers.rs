pub mod birthday_message;
pub mod upsert_person;

use crate::capability::clock::ClockCapability;
use crate::capability::person::PersonCapability;
use actix_web::web;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error.";

pub fn routes<W>(cfg: &mut web::ServiceConfig)
where
    W: PersonCapability + ClockCapability + 'static,
{
    cfg.service(
        web::resource("/hello/{username}")
            .route(web::post().to(upsert_person::handler::<W>))
            .route(web::get().to(birthday_message::handler::<W>)),
    );
}

#[cfg(test)]
pub fn test_app(
    worker: web::Data<crate::test_worker::TestWorker>,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    actix_web::App::new()
        .app_data(worker)
        .wrap(actix_web::middleware::from_fn(crate::logging::log_request))
        .configure(routes::<crate::test_worker::TestWorker>)
}
