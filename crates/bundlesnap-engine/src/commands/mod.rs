//! Engine commands

pub mod batch;
pub mod bundle;
pub mod report;
pub mod verify;
