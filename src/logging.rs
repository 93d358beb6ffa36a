//! Process-wide log setup

use std::io::Write;

use log::LevelFilter;

/// Log level and line format derived from the `-x`/`-xx` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPolicy {
    pub level: LevelFilter,
    /// Prefix every line with the emitting module
    pub show_target: bool,
}

impl LogPolicy {
    pub fn from_flags(debug: bool, extended_debug: bool) -> Self {
        if extended_debug {
            Self {
                level: LevelFilter::Debug,
                show_target: true,
            }
        } else if debug {
            Self {
                level: LevelFilter::Debug,
                show_target: false,
            }
        } else {
            Self {
                level: LevelFilter::Warn,
                show_target: false,
            }
        }
    }
}

/// Installs the global logger. Later calls leave the first logger in place.
pub fn init(policy: LogPolicy) {
    let show_target = policy.show_target;

    let result = env_logger::Builder::new()
        .filter_level(policy.level)
        .format(move |buf, record| {
            if show_target {
                writeln!(
                    buf,
                    "{:<5} {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(buf, "{:<5} {}", record.level(), record.args())
            }
        })
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
