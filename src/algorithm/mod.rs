//! Algorithm implementations for the cohort study workflow
//!
//! This module contains the cohort construction rules and the
//! label-based routing of signal files.

pub mod cohort;
pub mod routing;
