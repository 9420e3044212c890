//! `log` backend setup.

use env_logger::Env;

/// Install env_logger, honouring `RUST_LOG` and defaulting to `info`.
/// A second call is a no-op.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
