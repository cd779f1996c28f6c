//! This file defines the mgnrega-stats binary entry point.

use mgnrega_stats::app;
use mgnrega_stats::cli;
use mgnrega_stats::metrics;
use mgnrega_stats::server;
use mgnrega_stats::tracing;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing(&args);
    ::tracing::debug!("{:?}", args);
    metrics::register_metrics();
    let service = app::service(&args);
    server::serve(&args, service).await;
}
