//! HamQRG Core: shared error types.
//!
//! This crate provides the foundational types used across all HamQRG crates.
//! It has no internal HamQRG dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias

pub mod error;

pub use error::{Error, Result};
