use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// HTTP stack modules held at `warn` unless RUST_LOG says otherwise.
const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{}=warn", module));
    }
    EnvFilter::new(directives)
}

/// Install the global subscriber. `log_format` is "json" or anything else for pretty.
/// Calling it twice is a no-op.
pub fn init_logging(log_level: &str, log_format: &str) {
    let subscriber = tracing_subscriber::registry().with(build_filter(log_level));

    if log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(fmt_layer).try_init();
    }
}
