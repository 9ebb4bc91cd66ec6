use std::process::ExitCode;

use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // configuration problems are reported before logging exists, so print them
    let cfg = match server::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("server: {e}");
            return ExitCode::FAILURE;
        }
    };

    common::utils::logging::init_logging();
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "server service starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::serve(cfg) => match res {
                Ok(()) => {
                    info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "server", event = "run_failed", error = %e, "server failed");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
