use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Line format for process logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable single lines.
    Compact,
}

/// Install the process-wide subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_directives` applies.
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing(format: LogFormat, default_directives: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(
                base.with_file(false)
                    .with_line_number(false)
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
        LogFormat::Compact => registry.with(base.compact()).try_init(),
    };
    // already installed by the embedding process
    installed.ok();
}

