use std::env;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "./logs/fuzzy-duper.log";

/// Log to stdout (pretty, coloured) and to a plain-text file.
///
/// `TRACING_LEVEL` sets the level for this crate's own events (default
/// `info`); dependencies only log warnings. A value with `=` or `,` is taken
/// as a full filter directive. `LOG_FILE_PATH` sets the file (default
/// `./logs/fuzzy-duper.log`). Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init_logger() -> impl Drop {
    let level = env::var("TRACING_LEVEL").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    let filter_layer = EnvFilter::new(filter_directive(&level));

    let log_file_path = env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

    let file_appender = tracing_appender::rolling::never("./", &log_file_path);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .with_target(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %log_file_path,
        "fuzzy-duper logging configured"
    );

    guard
}

/// Scope a bare level to the library and binary crates.
fn filter_directive(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("warn,fuzzy_duper={level}")
}
