//! relnote core - shared types for release metadata derivation
//!
//! This crate provides the commit data model, the error taxonomy and the
//! layered configuration used by the parser, version and release-note crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ConfigError, GitError, MessageError, ValidationError, VersionError};
pub use types::{CommitLogEntry, CommitMessage};
