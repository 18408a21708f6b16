//! Logging utilities
//!
//! The crate logs through the `log` facade. Binaries and tests pick a backend;
//! these helpers install `env_logger`.

pub use log::{debug, error, info, trace, warn, SetLoggerError};

/// Initialize logging from `RUST_LOG`
///
/// Returns an error if a global logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    env_logger::try_init()
}

/// Initialize logging with `level` as the default filter
///
/// `RUST_LOG` still wins when set. `level` uses `env_logger` filter syntax, so
/// `"debug"` and `"scene_engine::scene=trace,info"` are both accepted.
pub fn init_with_level(level: &str) -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_does_not_panic() {
        let first = init_with_level("debug");
        let second = init();
        // At most one of the two can own the global logger.
        assert!(first.is_err() || second.is_err());
    }
}
