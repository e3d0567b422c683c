use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt, prelude::*, util::TryInitError};

#[allow(unused_imports)]
pub use tracing::{debug, error, info, trace, warn};

/// Logs to stderr, stdout carries the results.
///
/// `verbosity` counts the `-v` flags: none logs warnings only, then info,
/// debug and trace for this binary and the core crate.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let stderr_log = fmt::layer().compact().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            stderr_log.with_filter(
                Targets::default()
                    .with_target("farina", level)
                    .with_target("farina_core", level)
                    .with_default(Level::WARN),
            ),
        )
        .try_init()
}
