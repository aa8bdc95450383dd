//! Command implementations.
//!
//! A run is two operations back to back: [`populate`] fills the record
//! store from the requested trees (unless it already holds data), then
//! [`report`] prints the source files whose checksum is missing from the
//! destination.

pub mod populate;
pub mod report;
