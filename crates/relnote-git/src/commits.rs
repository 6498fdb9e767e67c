//! Commit history operations

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use relnote_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{LogRange, LogRangeType, RawCommit};

impl GitRepo {
    /// Read the commit log for a range, newest first
    #[instrument(skip(self), fields(range_type = %range.range_type))]
    pub fn log(&self, range: &LogRange) -> Result<Vec<RawCommit>> {
        if !self.has_commits() {
            debug!("repository has no commits");
            return Ok(Vec::new());
        }

        let commits = match range.range_type {
            LogRangeType::Date => self.log_between_dates(range)?,
            LogRangeType::Tag | LogRangeType::Hash => {
                let end = self.resolve(range.end.as_deref().unwrap_or("HEAD"))?;
                let start = range.start.as_deref().map(|s| self.resolve(s)).transpose()?;
                self.walk(end, start, |_| true)?
            }
        };

        debug!(count = commits.len(), "read commit log");
        Ok(commits)
    }

    fn log_between_dates(&self, range: &LogRange) -> Result<Vec<RawCommit>> {
        let since = range.start.as_deref().map(day_start).transpose()?;
        // the end date is inclusive
        let until = range
            .end
            .as_deref()
            .map(|d| day_start(d).map(|t| t + 86_400))
            .transpose()?;

        let head = self.head_commit()?.id();
        self.walk(head, None, |seconds| {
            since.map_or(true, |s| seconds >= s) && until.map_or(true, |u| seconds < u)
        })
    }

    /// Walk from `tip`, excluding everything reachable from `hide`
    fn walk(
        &self,
        tip: Oid,
        hide: Option<Oid>,
        keep: impl Fn(i64) -> bool,
    ) -> Result<Vec<RawCommit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(tip)?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if keep(commit.author().when().seconds()) {
                commits.push(commit_to_raw(&commit));
            }
        }

        Ok(commits)
    }
}

/// Unix time of `YYYY-MM-DD` at midnight UTC
fn day_start(date: &str) -> Result<i64> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().timestamp())
        .ok_or_else(|| GitError::InvalidRange(format!("'{}' is not a YYYY-MM-DD date", date)))
}

/// Convert a git2 Commit to a RawCommit
fn commit_to_raw(commit: &git2::Commit<'_>) -> RawCommit {
    let author = commit.author();
    let when = author.when();

    let date = FixedOffset::east_opt(when.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(when.seconds(), 0).single())
        .map(|t| t.format("%Y-%m-%d").to_string())
        .or_else(|| {
            Utc.timestamp_opt(when.seconds(), 0)
                .single()
                .map(|t| t.format("%Y-%m-%d").to_string())
        })
        .unwrap_or_default();

    RawCommit {
        date,
        timestamp: when.seconds(),
        author_name: author.name().unwrap_or("Unknown").to_string(),
        hash: commit.id().to_string().chars().take(7).collect(),
        subject: commit.summary().unwrap_or_default().to_string(),
        body: commit.body().unwrap_or_default().trim_end().to_string(),
    }
}
