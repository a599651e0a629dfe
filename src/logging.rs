use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber for the CLI binaries.
///
/// `quiet` wins over `verbose`; without either flag `RUST_LOG` applies and
/// falls back to `warn`.
pub fn init(verbose: bool, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, quiet))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("warn,prodgen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
