// fieldstrip/src/logger.rs
//! Logging setup for the fieldstrip binary.
//!
//! All log output goes to stderr through `env_logger`, so stdout stays
//! reserved for confirmation messages, diffs and JSON reports. `RUST_LOG`
//! is honored unless a level is forced from the command line.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// The crates whose level the command-line flags control.
const OWN_MODULES: [&str; 2] = ["fieldstrip", "fieldstrip_core"];

/// Initializes the global logger once; later calls are ignored.
///
/// * `None` keeps `RUST_LOG` (default `warn`).
/// * `Some(LevelFilter::Off)` silences everything.
/// * Any other level is forced for the fieldstrip crates only.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    match level {
        Some(LevelFilter::Off) => {
            builder.filter_level(LevelFilter::Off);
        }
        Some(level) => {
            for module in OWN_MODULES {
                builder.filter_module(module, level);
            }
        }
        None => {}
    }
    builder.format_timestamp(None).target(Target::Stderr);
    let _ = builder.try_init();
}

/// Maps the global CLI flags to a forced log level.
pub fn level_from_flags(quiet: bool, debug: bool, disable_debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if disable_debug {
        Some(LevelFilter::Info)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
