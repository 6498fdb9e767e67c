//! relnote git - repository access for release metadata
//!
//! This crate reads the commit log by range, lists and creates version tags,
//! and reports the current branch. It hands raw commit records to the parser
//! and never interprets commit messages itself.

mod commits;
mod repository;
mod status;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{LogRange, LogRangeType, RawCommit, TagInfo};
