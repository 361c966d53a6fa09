use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const QUIET_DIRECTIVES: &str = "investors=error";
const VERBOSE_DIRECTIVES: &str = "investors=debug";

/// Filter for the app's events. A valid `RUST_LOG` replaces the defaults entirely;
/// otherwise errors are always on and `verbose` adds debug output.
pub fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let fallback = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        QUIET_DIRECTIVES
    };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs the global subscriber, writing to stderr so rendered views stay on stdout.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(env_filter(verbose, rust_log.as_deref()))
        .init();
}
