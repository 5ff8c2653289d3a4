//! Core library for es2graphite
//!
//! This crate is an implementation detail of the `es2graphite` tool. Its API is fluid and may change
//! without warning and in a semver-incompatible way.
//!
//! # Module Organization
//!
//! - [`flatten`]: Turns nested status documents into flat metric records
//! - [`documents`]: Per-endpoint adapters that set the path prefix for each document
//! - [`source`]: HTTP client for the cluster's monitoring API
//! - [`sink`]: Graphite submission in plaintext or pickle form
//! - [`poller`]: One poll cycle, from fetch to emit
//! - [`commands`]: Command-line interface and orchestration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod documents;

#[doc(hidden)]
pub mod flatten;

#[doc(hidden)]
pub mod poller;

#[doc(hidden)]
pub mod sink;

#[doc(hidden)]
pub mod source;

pub use crate::commands::{Host, run};
