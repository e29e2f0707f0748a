use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install global subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags
pub fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(verbose, quiet)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn level_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::level_filter;

    #[test]
    fn level_filter_test() {
        assert_eq!(level_filter(0, false), "info");
        assert_eq!(level_filter(1, false), "debug");
        assert_eq!(level_filter(5, false), "trace");
        assert_eq!(level_filter(0, true), "warn");
    }
}
