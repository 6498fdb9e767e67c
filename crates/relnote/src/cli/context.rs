//! Shared command context
//!
//! Holds the effective configuration and builds the repository, version
//! strategy and changelog generator the commands work with.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use semver::Version;
use tracing::{debug, info, instrument};

use relnote_changelog::{ChangelogGenerator, ReleaseNote};
use relnote_core::config::{load_effective_config, Config};
use relnote_core::error::{ConfigError, GitError, MessageError};
use relnote_core::CommitLogEntry;
use relnote_git::{GitRepo, LogRange, LogRangeType, TagInfo};
use relnote_strategies::{SemVerStrategy, VersionDecision, VersionStrategy};

/// Effective configuration for a working directory
#[derive(Debug)]
pub struct Context {
    /// Merged configuration
    pub config: Config,
    /// Files that contributed to the configuration, lowest precedence first
    pub files: Vec<PathBuf>,
    /// Directory the configuration was resolved from
    pub dir: PathBuf,
}

/// The latest version tag and the version it names
#[derive(Debug, Clone)]
pub struct CurrentVersion {
    pub tag: Option<TagInfo>,
    pub version: Version,
}

impl CurrentVersion {
    /// Name of the latest tag, empty when there is none
    pub fn tag_name(&self) -> &str {
        self.tag.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }
}

/// The next version with the commits it was computed from
#[derive(Debug, Clone)]
pub struct NextVersion {
    pub current: CurrentVersion,
    pub decision: VersionDecision,
    pub commits: Vec<CommitLogEntry>,
}

impl NextVersion {
    /// Next version; the current one when nothing was resolved
    pub fn version(&self) -> Version {
        self.decision
            .version
            .clone()
            .unwrap_or_else(|| self.current.version.clone())
    }
}

impl Context {
    /// Load the effective configuration for `dir`
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let (config, files) = load_effective_config(dir)?;
        debug!(files = ?files, "configuration loaded");
        Ok(Self {
            config,
            files,
            dir: dir.to_path_buf(),
        })
    }

    /// Open the repository containing the working directory
    pub fn repo(&self) -> Result<GitRepo, GitError> {
        GitRepo::discover(&self.dir)
    }

    /// Version strategy built from the versioning rules
    pub fn strategy(&self) -> SemVerStrategy {
        SemVerStrategy::from_config(&self.config)
    }

    /// Commit parser, release note builder and formatter
    pub fn generator(&self) -> Result<ChangelogGenerator, MessageError> {
        ChangelogGenerator::from_config(&self.config)
    }

    /// Glob selecting version tags
    pub fn tag_filter(&self) -> &str {
        &self.config.tag.filter
    }

    /// Latest tag and its version; `0.0.0` when the repository has no tag
    #[instrument(skip_all)]
    pub fn current_version(
        &self,
        repo: &GitRepo,
        strategy: &dyn VersionStrategy,
    ) -> anyhow::Result<CurrentVersion> {
        let tag = repo.last_tag(self.tag_filter())?;
        let name = tag.as_ref().map(|t| t.name.as_str()).unwrap_or("");
        let version = strategy
            .parse(name)
            .with_context(|| format!("error parsing version from git tag '{}'", name))?;

        debug!(tag = name, %version, "current version");
        Ok(CurrentVersion { tag, version })
    }

    /// Next version from the commits since the latest tag
    #[instrument(skip_all)]
    pub fn next_version(
        &self,
        repo: &GitRepo,
        strategy: &dyn VersionStrategy,
        generator: &ChangelogGenerator,
    ) -> anyhow::Result<NextVersion> {
        let current = self.current_version(repo, strategy)?;
        let tag = current.tag.as_ref().map(|t| t.name.as_str());
        let raw = repo
            .log(&LogRange::tags(tag, None))
            .context("error getting git log")?;
        let commits = generator.parse_log(&raw)?;
        let decision = strategy.next_version(Some(&current.version), &commits)?;

        info!(
            current = %current.version,
            bump_type = %decision.bump_type,
            updated = decision.updated,
            commits = commits.len(),
            "next version computed"
        );

        Ok(NextVersion {
            current,
            decision,
            commits,
        })
    }

    /// Release note for the next version, dated now
    pub fn next_release_note(
        &self,
        next: &NextVersion,
        generator: &ChangelogGenerator,
    ) -> ReleaseNote {
        generator.release_note(Some(next.version()), "", Some(Utc::now()), &next.commits)
    }

    /// Release note for an existing tag, covering the commits since the tag before it
    #[instrument(skip(self, repo, strategy, generator))]
    pub fn tag_release_note(
        &self,
        repo: &GitRepo,
        strategy: &dyn VersionStrategy,
        generator: &ChangelogGenerator,
        tag: &str,
    ) -> anyhow::Result<ReleaseNote> {
        let info = repo.find_tag(tag, self.tag_filter())?;
        let previous = repo.previous_tag(tag, self.tag_filter())?;
        let raw = repo
            .log(&LogRange::tags(
                previous.as_ref().map(|t| t.name.as_str()),
                Some(tag),
            ))
            .with_context(|| format!("error getting git log from tag: {}", tag))?;

        let note = generator.generate(strategy.parse(tag).ok(), tag, info.date, &raw)?;
        Ok(note)
    }

    /// Resolve a command-line range; a tag range starts at the latest tag by default
    pub fn log_range(
        &self,
        repo: &GitRepo,
        range_type: LogRangeType,
        start: Option<&str>,
        end: Option<&str>,
    ) -> anyhow::Result<LogRange> {
        let range = match range_type {
            LogRangeType::Tag if start.map_or(true, str::is_empty) => {
                let last = repo.last_tag(self.tag_filter())?;
                LogRange::tags(last.as_ref().map(|t| t.name.as_str()), end)
            }
            _ => LogRange::new(range_type, start, end),
        };
        debug!(?range, "resolved log range");
        Ok(range)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use git2::{Repository, Signature, Time};
    use tempfile::TempDir;

    /// Repository with a configured identity and the given commits, oldest first, one day apart
    pub fn repo_with_commits(messages: &[&str]) -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Tester").unwrap();
            config.set_str("user.email", "tester@example.com").unwrap();
        }
        for (i, message) in messages.iter().enumerate() {
            commit(&repo, message, 1_700_000_000 + i as i64 * 86_400);
        }
        (temp, repo)
    }

    /// Commit on HEAD with a fixed time
    pub fn commit(repo: &Repository, message: &str, seconds: i64) {
        let sig = Signature::new("Tester", "tester@example.com", &Time::new(seconds, 0)).unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    /// Annotated tag on HEAD
    pub fn tag(repo: &Repository, name: &str, seconds: i64) {
        let sig = Signature::new("Tester", "tester@example.com", &Time::new(seconds, 0)).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag(name, head.as_object(), &sig, name, false).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn context(dir: &Path) -> Context {
        Context {
            config: Config::default(),
            files: Vec::new(),
            dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_current_version_without_tags() {
        let (temp, _repo) = repo_with_commits(&["feat: first"]);
        let ctx = context(temp.path());
        let repo = ctx.repo().unwrap();

        let current = ctx.current_version(&repo, &ctx.strategy()).unwrap();
        assert_eq!(current.version, Version::new(0, 0, 0));
        assert_eq!(current.tag_name(), "");
    }

    #[test]
    fn test_next_version_since_last_tag() {
        let (temp, repo) = repo_with_commits(&["feat: first", "fix: second"]);
        tag(&repo, "v1.2.0", 1_700_200_000);
        commit(&repo, "feat(api): third", 1_700_300_000);
        commit(&repo, "docs: fourth", 1_700_400_000);

        let ctx = context(temp.path());
        let git = ctx.repo().unwrap();
        let generator = ctx.generator().unwrap();
        let next = ctx.next_version(&git, &ctx.strategy(), &generator).unwrap();

        assert_eq!(next.current.version, Version::new(1, 2, 0));
        assert_eq!(next.current.tag_name(), "v1.2.0");
        assert_eq!(next.commits.len(), 2);
        assert!(next.decision.updated);
        assert_eq!(next.version(), Version::new(1, 3, 0));
    }

    #[test]
    fn test_unparsable_tag_is_an_error() {
        let (temp, repo) = repo_with_commits(&["feat: first"]);
        tag(&repo, "release-candidate", 1_700_100_000);

        let ctx = context(temp.path());
        let git = ctx.repo().unwrap();
        let err = ctx.current_version(&git, &ctx.strategy()).unwrap_err();
        assert!(err.to_string().contains("release-candidate"));
    }

    #[test]
    fn test_tag_release_note_covers_previous_tag_range() {
        let (temp, repo) = repo_with_commits(&["feat: first"]);
        tag(&repo, "1.0.0", 1_700_100_000);
        commit(&repo, "fix: patch one", 1_700_200_000);
        commit(&repo, "fix: patch two", 1_700_300_000);
        tag(&repo, "1.0.1", 1_700_400_000);

        let ctx = context(temp.path());
        let git = ctx.repo().unwrap();
        let generator = ctx.generator().unwrap();
        let note = ctx
            .tag_release_note(&git, &ctx.strategy(), &generator, "1.0.1")
            .unwrap();

        assert_eq!(note.version, Some(Version::new(1, 0, 1)));
        assert_eq!(note.tag, "1.0.1");
        let names: Vec<_> = note.sections.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Bug Fixes"]);
    }

    #[test]
    fn test_tag_range_defaults_to_last_tag() {
        let (temp, repo) = repo_with_commits(&["feat: first"]);
        tag(&repo, "1.0.0", 1_700_100_000);

        let ctx = context(temp.path());
        let git = ctx.repo().unwrap();
        let range = ctx.log_range(&git, LogRangeType::Tag, None, None).unwrap();
        assert_eq!(range.start.as_deref(), Some("1.0.0"));

        let range = ctx
            .log_range(&git, LogRangeType::Hash, Some("abc"), None)
            .unwrap();
        assert_eq!(range.start.as_deref(), Some("abc"));
    }
}
