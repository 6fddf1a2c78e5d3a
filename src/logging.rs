use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Installs the global tracing subscriber: a console layer and a (non-blocking)
/// log file layer, each with its own filter.
///
/// Log lines are only guaranteed to be flushed to the file once the returned guard is dropped,
/// so keep it alive until the program exits.
pub fn initialize_tracing<P: AsRef<Path>>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: P,
    log_file_name: &str,
) -> Result<WorkerGuard> {
    let log_file_output_directory = log_file_output_directory.as_ref();

    std::fs::create_dir_all(log_file_output_directory)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!(
                "Failed to create missing log file directory at {}.",
                log_file_output_directory.display()
            )
        })?;

    let file_appender = tracing_appender::rolling::never(log_file_output_directory, log_file_name);
    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level_filter);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file_writer)
        .with_ansi(false)
        .with_filter(log_file_level_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install the global tracing subscriber.")?;

    Ok(guard)
}
