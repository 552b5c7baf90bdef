//! Tracing initialisation helper.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise tracing for a host application.
///
/// With `debug` set, connector internals log at debug level; otherwise the
/// `RUST_LOG` environment variable applies (default `info`).
/// Should be called once at application startup.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("info,hwlink_connector=debug,hwlink_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
