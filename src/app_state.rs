use crate::cli::CommandLineArgs;
use crate::dataset::DatasetStore;
use crate::metrics;

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// District dataset. Immutable for the lifetime of the process.
    pub dataset: DatasetStore,
}

impl AppState {
    /// Create and return an [AppState], loading the dataset named by `args`.
    pub fn new(args: &CommandLineArgs) -> Self {
        let dataset = DatasetStore::load_or_sentinel(&args.data_file);
        Self::with_dataset(args, dataset)
    }

    /// Create and return an [AppState] serving an already loaded dataset.
    pub fn with_dataset(args: &CommandLineArgs, dataset: DatasetStore) -> Self {
        metrics::DATASET_DISTRICTS.set(dataset.len().try_into().unwrap_or(i64::MAX));
        Self {
            args: args.clone(),
            dataset,
        }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
