//! relnote strategies - version resolution from classified commits
//!
//! This crate classifies parsed commits into bump levels and folds a commit
//! list into the next semantic version.

mod semver;
mod traits;
pub mod types;

pub use semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::{BumpType, VersionDecision};
