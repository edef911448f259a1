//! IO utilities for file operations
//!
//! Signal file discovery, writing the merged table and copying routed
//! files.

pub mod copy;
pub mod paths;
pub mod table;

// Re-export commonly used functions for convenience
pub use copy::{BucketDirs, CollisionPolicy, CopySummary, check_plan, copy_routed_files};
pub use paths::find_signal_files;
pub use table::{cohort_fields, write_cohort_table};
