//! Logger setup for the binary

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialize the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output and the
/// default is info.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Fails only when a logger is already installed
    let _ = Builder::from_env(env).try_init();
}
