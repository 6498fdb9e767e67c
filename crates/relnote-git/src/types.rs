//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as read from the log, before message parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Author date as `YYYY-MM-DD`, in the author's timezone
    pub date: String,
    /// Author time as unix seconds
    pub timestamp: i64,
    /// Author name
    pub author_name: String,
    /// Short hash (first 7 characters)
    pub hash: String,
    /// First line of the message
    pub subject: String,
    /// Message after the subject, empty when absent
    pub body: String,
}

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Tagger time for annotated tags, commit time for lightweight ones
    pub date: Option<DateTime<Utc>>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, date: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

/// How the bounds of a log range are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRangeType {
    /// Bounds are tag names
    Tag,
    /// Bounds are `YYYY-MM-DD` dates, both inclusive
    Date,
    /// Bounds are commit hashes or any revision
    Hash,
}

impl std::fmt::Display for LogRangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag => write!(f, "tag"),
            Self::Date => write!(f, "date"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

/// A range of the commit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRange {
    pub range_type: LogRangeType,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl LogRange {
    /// Create a range; empty bounds are treated as absent
    pub fn new(range_type: LogRangeType, start: Option<&str>, end: Option<&str>) -> Self {
        let bound = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            range_type,
            start: bound(start),
            end: bound(end),
        }
    }

    /// Whole history reachable from HEAD
    pub fn all() -> Self {
        Self::new(LogRangeType::Hash, None, None)
    }

    /// Commits after `start` up to and including `end`
    pub fn tags(start: Option<&str>, end: Option<&str>) -> Self {
        Self::new(LogRangeType::Tag, start, end)
    }
}
