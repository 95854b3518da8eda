use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info,sea_orm=warn,sqlx=warn";

/// Initialize tracing subscriber with compact, human-readable output on stdout.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info` for our crates with the ORM and driver kept at `warn`
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Selected by the binaries when `LOG_FORMAT=json`.
pub fn init_logging_json() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Pick the subscriber flavour from `LOG_FORMAT`.
pub fn init_logging_from_env() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}
