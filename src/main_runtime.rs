use kickoff::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "kickoff.log";

/// Daily rotating appender in `log_dir`, or `None` (console only) when the
/// directory or today's file cannot be created.
fn open_log_file(log_dir: &str) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "Warning: Could not create log directory {} ({}), file logging disabled",
            log_dir, e
        );
        return None;
    }

    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file in {} ({}), file logging disabled",
                log_dir, e
            );
            None
        }
    }
}

/// Full logging for the server: console plus optional daily-rolling file.
///
/// The returned guard must be held until shutdown so buffered file output is
/// flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},kickoff=debug,sqlx=warn,tower_http=info",
            config.level
        ))
    });

    let (file_layer, guard) = match std::env::var("KICKOFF_LOG_DIR") {
        Ok(log_dir) => match open_log_file(&log_dir) {
            Some(file_appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false) // No color codes in file
                    .with_target(true);
                eprintln!("Logging to: {}/{}", log_dir, LOG_FILE_PREFIX);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        },
        Err(_) => (None, None),
    };

    let (json_layer, text_layer) = if config.json {
        (Some(tracing_subscriber::fmt::layer().json().with_target(true)), None)
    } else {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer)
        .init();

    guard
}

pub fn init_logging_simple() {
    // Minimal logging for one-shot CLI commands; stdout carries the JSON result
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
