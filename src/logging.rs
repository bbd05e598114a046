use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `DEBUG` is set.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init() -> WorkerGuard {
    let default_level = if std::env::var("DEBUG").map_or(false, |v| !v.is_empty()) {
        "debug"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    guard
}

pub async fn log_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.path().to_string();

    let res = next.call(req).await?;

    info!(
        %method,
        %path,
        status = res.status().as_u16(),
        duration = ?start.elapsed(),
        "Handled request"
    );

    Ok(res)
}
