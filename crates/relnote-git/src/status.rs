//! Branch status operations

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get the current branch name, `None` on a detached HEAD
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            // unborn branch: HEAD still names it
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                return Ok(head
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(str::to_string));
            }
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    /// Check if HEAD is detached
    pub fn is_head_detached(&self) -> Result<bool> {
        Ok(self.repo.head_detached()?)
    }
}
