//! Logging utilities for output and progress tracking
//!
//! Run-step log lines and progress bars.

pub mod log;
pub mod progress;

// Re-export commonly used functions
pub use self::log::{log_signal_scan, log_table_read, log_table_written};
pub use progress::{create_main_progress_bar, finish_progress_bar};
