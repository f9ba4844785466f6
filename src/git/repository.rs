use crate::error::{GitWorkflowError, Result};
use git2::{BranchType, ErrorCode, Repository as Git2Repo, RepositoryState, StatusOptions};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Like [Git2Repository::open], but `Ok(None)` when `path` is not inside a repository
    pub fn try_open<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        match Git2Repo::discover(path) {
            Ok(repo) => Ok(Some(Git2Repository { repo })),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// `git init` at `path`
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::init(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn workdir(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    fn statuses(&self, include_untracked: bool) -> Result<git2::Statuses<'_>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false);
        Ok(self.repo.statuses(Some(&mut options))?)
    }

    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn tag_commit_id(&self, tag_name: &str) -> Option<git2::Oid> {
        self.repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .ok()
            .and_then(|r| r.peel_to_commit().ok())
            .map(|commit| commit.id())
    }
}

impl super::Repository for Git2Repository {
    fn root(&self) -> Result<PathBuf> {
        Ok(self.workdir().to_path_buf())
    }

    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            // fresh repository: HEAD points at a branch with no commits yet
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn changes(&self) -> Result<bool> {
        Ok(!self.statuses(true)?.is_empty())
    }

    fn is_rebasing(&self) -> Result<bool> {
        Ok(matches!(
            self.repo.state(),
            RepositoryState::Rebase
                | RepositoryState::RebaseInteractive
                | RepositoryState::RebaseMerge
                | RepositoryState::ApplyMailboxOrRebase
        ))
    }

    fn has_commits(&self) -> Result<bool> {
        Ok(self.head_commit()?.is_some())
    }

    fn operation_in_progress(&self) -> Result<bool> {
        Ok(self.repo.state() != RepositoryState::Clean)
    }

    fn conflicts(&self) -> Result<Vec<String>> {
        let statuses = self.statuses(false)?;
        Ok(statuses
            .iter()
            .filter(|entry| entry.status().is_conflicted())
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect())
    }

    fn conflicts_string(&self) -> Result<Vec<String>> {
        let marker = Regex::new(r"^(?:<{7}|>{7})(?:\s|$)|^={7}$")
            .map_err(|e| GitWorkflowError::command(format!("bad marker pattern: {}", e)))?;

        let mut index = self.repo.index()?;
        index.read(false)?;

        // conflicted paths appear once per stage
        let paths: BTreeSet<String> = index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .collect();

        let mut found = Vec::new();
        for path in paths {
            // deleted or binary files cannot carry textual markers
            let Ok(content) = fs::read_to_string(self.workdir().join(&path)) else {
                continue;
            };
            for (line_no, line) in content.lines().enumerate() {
                if marker.is_match(line) {
                    found.push(format!("{}:{}: {}", path, line_no + 1, line.trim_end()));
                }
            }
        }
        Ok(found)
    }

    fn stale_branches(&self) -> Result<Vec<String>> {
        let mut stale = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            let Some(name) = branch.name()? else {
                continue;
            };
            // no upstream configured: a purely local branch, not stale
            let Ok(upstream) = self.repo.branch_upstream_name(&format!("refs/heads/{}", name))
            else {
                continue;
            };
            let Some(upstream) = upstream.as_str() else {
                continue;
            };
            if self.repo.find_reference(upstream).is_err() {
                stale.push(name.to_string());
            }
        }
        Ok(stale)
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let Some(head) = self.head_commit()? else {
            return Ok(None);
        };

        // Map tagged commits to tag names (handles lightweight and annotated tags)
        let mut tag_commits: HashMap<git2::Oid, String> = HashMap::new();
        for tag_name in self.repo.tag_names(None)?.iter().flatten() {
            if let Some(oid) = self.tag_commit_id(tag_name) {
                tag_commits.insert(oid, tag_name.to_string());
            }
        }
        if tag_commits.is_empty() {
            return Ok(None);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head.id())?;
        for oid in revwalk {
            if let Some(tag_name) = tag_commits.get(&oid?) {
                return Ok(Some(tag_name.clone()));
            }
        }

        Ok(None)
    }

    fn tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn has_stashes(&self) -> Result<bool> {
        match self.repo.find_reference("refs/stash") {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn commit_messages_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        let Some(head) = self.head_commit()? else {
            return Ok(Vec::new());
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(head.id())?;
        if let Some(stop) = tag.and_then(|t| self.tag_commit_id(t)) {
            revwalk.hide(stop)?;
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            messages.push(commit.message().unwrap_or("(empty message)").to_string());
        }

        messages.reverse();
        Ok(messages)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .head_commit()?
            .ok_or_else(|| GitWorkflowError::version("cannot tag a repository with no commits"))?;

        self.repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }

    fn exec(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(command = %args.join(" "), "git");

        let output = Command::new("git")
            .args(args)
            .current_dir(self.workdir())
            .output()
            .map_err(|e| GitWorkflowError::command(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitWorkflowError::command(format!(
                "git {} exited with code {}: {}",
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
