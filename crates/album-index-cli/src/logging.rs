use std::env;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Walk diagnostics (skipped folders, malformed data files) come from the
/// core crate and stay visible at the default level.
const DEFAULT_FILTER: &str = "warn,album_index=info,album_index_core=info";

/// Installs stderr and file layers. `TRACING_LEVEL` takes filter directives
/// (`debug`, `album_index_core::stats=trace`); a bare level applies to both
/// crates of the workspace and leaves dependencies at `warn`.
pub fn init_logger() -> impl Drop {
    let filter = match env::var("TRACING_LEVEL") {
        Ok(level) if !level.contains(['=', ',']) => {
            format!("warn,album_index={0},album_index_core={0}", level.trim())
        }
        Ok(directives) => directives,
        Err(_) => DEFAULT_FILTER.to_string(),
    };
    let filter_layer = EnvFilter::new(filter);

    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| "./logs/album-index.log".to_string());

    let file_appender = tracing_appender::rolling::never("./", &log_file_path);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(filter_layer)
        .init();

    debug!("Logging catalog diagnostics to stderr and {}", log_file_path);

    guard
}
