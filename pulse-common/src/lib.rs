//! Pulse Common - Shared types and utilities for the Pulse feedback stack.
//!
//! This crate provides:
//! - Error types and a `Result` alias
//! - Logging setup (structured JSON or human-readable output)
//! - Caller-side input validation for the ingestion boundary
//!
//! The analytics engine itself (`pulse-engine`) never rejects input; all
//! structural validation of incoming feedback happens here, before a
//! record reaches the engine.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
pub mod logging;
pub mod validation;

pub use error::{Error, Result};
pub use validation::{validate_new_feedback, ValidationError, ValidationResult, VALID_PRODUCTS};
