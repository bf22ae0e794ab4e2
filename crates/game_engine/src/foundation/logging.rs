//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `default_filter` is used when `RUST_LOG` is not set. Calling this more
/// than once keeps the first logger and returns `false`.
pub fn init(default_filter: &str) -> bool {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
