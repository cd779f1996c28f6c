pub mod count;

// Re-export types for convenience.
pub use crate::types::count::Count;
