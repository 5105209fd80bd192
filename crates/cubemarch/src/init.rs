//! Logging bootstrap.

/// Installs `env_logger` as the global logger, filtered by `RUST_LOG`.
///
/// Returns `false` if a logger was already installed; that is not an error,
/// so tests and hosts can call this freely.
pub fn init_logging() -> bool {
    let installed = env_logger::try_init().is_ok();
    if installed {
        log::info!("cubemarch-rs logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        assert!(!init_logging());
    }
}
