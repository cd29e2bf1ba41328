//! Configuration types for scanning, execution and the config file.
//!
//! Options are resolved once at start-up (CLI > config file > defaults) and
//! then passed read-only to the scanner and the target processor.

pub mod execution;
pub mod file;
pub mod scan;

pub use execution::{ConfirmMode, ExecutionOptions, RemovalStrategy};
pub use file::FileConfig;
pub use scan::ScanOptions;
