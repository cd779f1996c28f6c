//! Tracing (logging)

use crate::cli::CommandLineArgs;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "mgnrega_stats=debug,tower_http=debug";

/// Initialise tracing (logging)
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back to enable debug
/// logging for this crate and tower_http if not set. Events are written as human readable text,
/// or as one JSON object per line when `--log-json` is given.
pub fn init_tracing(args: &CommandLineArgs) {
    let (text_layer, json_layer) = if args.log_json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(text_layer)
        .with(json_layer)
        .init();
}
