//! Tag operations

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, instrument};

use relnote_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Tags matching the glob `filter` (all tags when empty), oldest first
    #[instrument(skip(self))]
    pub fn tags(&self, filter: &str) -> Result<Vec<TagInfo>> {
        let pattern = (!filter.is_empty()).then_some(filter);
        let names = self.repo.tag_names(pattern)?;

        let mut tags: Vec<TagInfo> = names
            .iter()
            .flatten()
            .map(|name| TagInfo::new(name, self.tag_date(name)))
            .collect();

        tags.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    /// Most recently created tag matching the filter
    pub fn last_tag(&self, filter: &str) -> Result<Option<TagInfo>> {
        let latest = self.tags(filter)?.pop();
        debug!(latest = ?latest.as_ref().map(|t| &t.name), "found latest tag");
        Ok(latest)
    }

    /// Find a tag by name among the tags matching the filter
    pub fn find_tag(&self, name: &str, filter: &str) -> Result<TagInfo> {
        self.tags(filter)?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| GitError::UnknownTag(name.to_string()))
    }

    /// Tag preceding `name` in creation order, among the tags matching the filter
    pub fn previous_tag(&self, name: &str, filter: &str) -> Result<Option<TagInfo>> {
        let tags = self.tags(filter)?;
        let position = tags
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| GitError::UnknownTag(name.to_string()))?;

        Ok(position.checked_sub(1).map(|i| tags[i].clone()))
    }

    /// Create an annotated tag on HEAD
    #[instrument(skip(self, message))]
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        let tag_ref = format!("refs/tags/{}", name);
        if self.repo.find_reference(&tag_ref).is_ok() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;
        let sig = self.repo.signature()?;
        self.repo.tag(name, head.as_object(), &sig, message, false)?;

        info!(name, "created tag");
        Ok(TagInfo::new(name, to_utc(sig.when().seconds())))
    }

    /// Tagger time of an annotated tag, otherwise the tagged commit's time
    fn tag_date(&self, name: &str) -> Option<DateTime<Utc>> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", name))
            .ok()?;

        if let Ok(tag) = reference.peel_to_tag() {
            if let Some(tagger) = tag.tagger() {
                return to_utc(tagger.when().seconds());
            }
        }

        let commit = reference.peel_to_commit().ok()?;
        let seconds = commit.committer().when().seconds();
        to_utc(seconds)
    }
}

fn to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}
