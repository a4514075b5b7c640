// Public modules
pub mod add;
pub mod cancel;
pub mod config;
pub mod error;
pub mod init;
pub mod materialize;
pub mod output;
pub mod project;
pub mod registry;
pub mod transpile;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{IndexStatus, MaterializationResult, MaterializationStatus, RunSummary};
