use git2::BranchType;

use crate::error::Result;
use crate::git::repository::BareRepo;
use crate::models::{RepositoryInfo, Tag};

impl BareRepo {
    /// Metadata for a bare repository; `None` when the repository has a
    /// working tree.
    ///
    /// `total_commits` walks the whole history reachable from `branch`.
    pub fn info(&self, branch: &str) -> Result<Option<RepositoryInfo>> {
        if !self.is_bare() {
            return Ok(None);
        }

        let mut branches = Vec::new();
        for item in self.repo().branches(Some(BranchType::Local))? {
            let (local, _) = item?;
            if let Some(name) = local.name()? {
                branches.push(name.to_string());
            }
        }

        Ok(Some(RepositoryInfo {
            name: self.name().to_string(),
            description: self.description(),
            branches,
            active_branch: self.active_branch()?,
            total_commits: self.count_commits(branch)?,
        }))
    }

    /// Tags in the order the store enumerates them; empty for non-bare repositories.
    ///
    /// Tags that do not point (directly or through an annotation) at a commit
    /// are left out.
    pub fn tags(&self) -> Result<Vec<Tag>> {
        if !self.is_bare() {
            return Ok(Vec::new());
        }

        let names = self.repo().tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let obj = self.repo().revparse_single(&format!("refs/tags/{}", name))?;
            let message = obj
                .as_tag()
                .and_then(|t| t.message())
                .map(|m| m.to_string());

            let Ok(commit) = obj.peel_to_commit() else {
                continue;
            };

            tags.push(Tag {
                name: name.to_string(),
                commit: commit.id().to_string(),
                message,
            });
        }

        Ok(tags)
    }

    /// Contents of the `description` file with trailing whitespace removed.
    pub fn description(&self) -> String {
        std::fs::read_to_string(self.repo().path().join("description"))
            .map(|d| d.trim_end().to_string())
            .unwrap_or_default()
    }

    /// Branch HEAD points at, even before its first commit. `None` when detached.
    pub fn active_branch(&self) -> Result<Option<String>> {
        let head = self.repo().find_reference("HEAD")?;
        Ok(head
            .symbolic_target()
            .map(|target| target.strip_prefix("refs/heads/").unwrap_or(target).to_string()))
    }
}
