//! bundlesnap CLI
//!
//! Argument types and command bodies shared by the `bundlesnap` and
//! `bundlesnap-diff` binaries.

pub mod commands;
