//! Log setup for the binary. Everything goes to stderr so stdout stays free
//! for the rendered page.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Maps `-v` occurrences to a level: none = warn, `-v` = debug, `-vv` = trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logging(verbosity: u8, ansi: bool) {
    let default_level = level_from_verbosity(verbosity).to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("barrierfree={default_level}")));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}
