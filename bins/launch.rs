use std::future::Future;
use std::process::ExitCode;

use configs::{AppConfig, ServiceDefaults};
use dotenvy::dotenv;
use server::errors::StartupError;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(service: &'static str) {
    // .env first so RUST_LOG / LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service, event = "logger_init", "tracing subscriber initialized");
}

/// Shared `main` for both binaries: logging, panic hook, runtime, lifecycle events.
pub fn launch<F, Fut>(service: &'static str, defaults: ServiceDefaults, run: F) -> ExitCode
where
    F: FnOnce(AppConfig) -> Fut,
    Fut: Future<Output = Result<(), StartupError>> + Send + 'static,
{
    init_logging(service);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match server::load_config(defaults) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        database = %cfg.database.url,
        "service starting"
    );

    let fut = run(cfg);
    rt.block_on(async move {
        match tokio::spawn(fut).await {
            Ok(Ok(())) => {
                info!(service, event = "stop", %service_id, pid, "service stopped normally");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!(service, event = "run_failed", error = %e, "service returned error");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(service, event = "task_join_error", error = %e, "service task join error");
                ExitCode::FAILURE
            }
        }
    })
}
