//! Utility functions for I/O and logging
//!
//! The I/O edges of the pipeline (file discovery, table writing, copying)
//! and the logging helpers they share.

pub mod io;
pub mod logging;
