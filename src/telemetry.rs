//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,question=debug,verbos_backend=debug,tower_http=info,axum=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//! - The drill front end owns stdout, so in that mode logs go to stderr.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,question=debug,verbos_backend=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
}

pub fn init_tracing(sink: LogSink) {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Each arm has its own builder type; init inside the arm.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    match (sink, json) {
        (LogSink::Stdout, true) => builder.json().init(),
        (LogSink::Stdout, false) => builder.init(),
        (LogSink::Stderr, true) => builder.json().with_writer(std::io::stderr).init(),
        (LogSink::Stderr, false) => builder.with_writer(std::io::stderr).with_ansi(false).init(),
    }
}
