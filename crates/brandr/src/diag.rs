//! Logger setup.
//!
//! The engine logs through the `log` facade. [`init_logger`] installs
//! `env_logger` as the backend; `RUST_LOG` controls filtering as usual and
//! everything at `info` and above is shown by default.
//!
//! Hosts with their own logger simply don't call it.

/// Install `env_logger` as the global logger.
///
/// Safe to call more than once: later calls leave the existing logger in
/// place and print a warning to stderr.
pub fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_default_env();

    if builder.try_init().is_err() {
        eprintln!("[brandr] Warning: a logger is already set, keeping it.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_logger();
        init_logger();
        log::info!("logger initialised");
    }
}
