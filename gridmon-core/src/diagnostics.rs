//! Diagnostic logging setup.
//!
//! Parsers only emit `tracing` events; nothing is printed unless the host
//! installs a subscriber. Hosts that carry the client's integer log level
//! setting can hand it to [`init_logging`].

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The client's legacy integer log level.
///
/// `0` (or less) is silent, `1` errors only, up to `5` and above for
/// everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Verbosity(pub i32);

impl Verbosity {
    pub const OFF: Verbosity = Verbosity(0);
    pub const ERROR: Verbosity = Verbosity(1);
    pub const WARN: Verbosity = Verbosity(2);
    pub const INFO: Verbosity = Verbosity(3);
    pub const DEBUG: Verbosity = Verbosity(4);
    pub const TRACE: Verbosity = Verbosity(5);

    /// Most verbose `tracing` level this setting lets through.
    pub fn level_filter(self) -> LevelFilter {
        match self.0 {
            i32::MIN..=0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

impl From<i32> for Verbosity {
    fn from(level: i32) -> Self {
        Verbosity(level)
    }
}

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        verbosity.level_filter()
    }
}

/// Filter used by [`init_logging`]: `RUST_LOG` when set and valid,
/// otherwise the verbosity.
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.level_filter().to_string()))
}

/// Install a global console subscriber.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one is left alone.
pub fn init_logging(verbosity: impl Into<Verbosity>) -> bool {
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(env_filter(verbosity.into()))
        .with(console_layer)
        .try_init()
        .is_ok()
}
