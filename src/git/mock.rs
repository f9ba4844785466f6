use crate::error::{GitWorkflowError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations.
///
/// Reads come from the configured state; mutations update that state the
/// way git would and are recorded in [MockRepository::calls].
pub struct MockRepository {
    state: RefCell<MockState>,
    calls: RefCell<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
struct MockState {
    root: PathBuf,
    current_branch: String,
    changes: bool,
    rebasing: bool,
    unborn: bool,
    /// A non-rebase operation (merge, cherry-pick, revert) is underway
    operation: bool,
    conflicts: Vec<String>,
    /// One entry consumed per scan; empty once exhausted
    conflict_scans: VecDeque<Vec<String>>,
    stale_branches: Vec<String>,
    local_branches: Vec<String>,
    tags: Vec<String>,
    latest_tag: Option<String>,
    stashes: usize,
    commit_messages: Vec<String>,
    /// `exec` fails for commands starting with any of these
    failing: Vec<String>,
    /// Conflicts the next `pull --rebase` or `rebase <upstream>` stops on
    rebase_stop: Option<Vec<String>>,
}

impl MockRepository {
    /// Create a mock repository on branch `master` with a clean tree
    pub fn new() -> Self {
        MockRepository {
            state: RefCell::new(MockState {
                root: PathBuf::from("/repo"),
                current_branch: "master".to_string(),
                local_branches: vec!["master".to_string()],
                ..MockState::default()
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_branch(self, name: impl Into<String>) -> Self {
        let name = name.into();
        {
            let mut state = self.state.borrow_mut();
            if !state.local_branches.contains(&name) {
                state.local_branches.push(name.clone());
            }
            state.current_branch = name;
        }
        self
    }

    pub fn with_local_branches(self, names: &[&str]) -> Self {
        self.state.borrow_mut().local_branches = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_changes(self, changes: bool) -> Self {
        self.state.borrow_mut().changes = changes;
        self
    }

    pub fn with_rebasing(self, rebasing: bool) -> Self {
        self.state.borrow_mut().rebasing = rebasing;
        self
    }

    /// HEAD has no commit yet, as right after `git init`
    pub fn unborn(self) -> Self {
        self.state.borrow_mut().unborn = true;
        self
    }

    pub fn with_operation_in_progress(self, operation: bool) -> Self {
        self.state.borrow_mut().operation = operation;
        self
    }

    pub fn with_conflicts(self, paths: &[&str]) -> Self {
        self.state.borrow_mut().conflicts = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Queue the result of the next conflict-marker scan
    pub fn with_conflict_scan(self, markers: &[&str]) -> Self {
        self.state
            .borrow_mut()
            .conflict_scans
            .push_back(markers.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn with_stale_branches(self, names: &[&str]) -> Self {
        self.state.borrow_mut().stale_branches = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Add a tag; the last one added is also the latest tag
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        let name = name.into();
        {
            let mut state = self.state.borrow_mut();
            state.latest_tag = Some(name.clone());
            state.tags.push(name);
        }
        self
    }

    pub fn with_stashes(self, count: usize) -> Self {
        self.state.borrow_mut().stashes = count;
        self
    }

    pub fn with_commit_messages(self, messages: &[&str]) -> Self {
        self.state.borrow_mut().commit_messages = messages.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Make the next rebase (or `pull --rebase`) stop on conflicts in `paths`
    pub fn stopping_rebase(self, paths: &[&str]) -> Self {
        self.state.borrow_mut().rebase_stop = Some(paths.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Make every recorded command starting with `prefix` fail
    pub fn failing(self, prefix: impl Into<String>) -> Self {
        self.state.borrow_mut().failing.push(prefix.into());
        self
    }

    /// Recorded mutations, in order, as git command lines without `git`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn stash_count(&self) -> usize {
        self.state.borrow().stashes
    }

    fn record(&self, command: String) -> Result<()> {
        let fails = self
            .state
            .borrow()
            .failing
            .iter()
            .any(|prefix| command.starts_with(prefix.as_str()));
        self.calls.borrow_mut().push(command.clone());
        if fails {
            return Err(GitWorkflowError::command(format!("git {} failed", command)));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn root(&self) -> Result<PathBuf> {
        Ok(self.state.borrow().root.clone())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.state.borrow().current_branch.clone())
    }

    fn changes(&self) -> Result<bool> {
        Ok(self.state.borrow().changes)
    }

    fn is_rebasing(&self) -> Result<bool> {
        Ok(self.state.borrow().rebasing)
    }

    fn has_commits(&self) -> Result<bool> {
        Ok(!self.state.borrow().unborn)
    }

    fn operation_in_progress(&self) -> Result<bool> {
        let state = self.state.borrow();
        Ok(state.operation || state.rebasing)
    }

    fn conflicts(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().conflicts.clone())
    }

    fn conflicts_string(&self) -> Result<Vec<String>> {
        Ok(self
            .state
            .borrow_mut()
            .conflict_scans
            .pop_front()
            .unwrap_or_default())
    }

    fn stale_branches(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().stale_branches.clone())
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().local_branches.clone())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.state.borrow().latest_tag.clone())
    }

    fn tags(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().tags.clone())
    }

    fn has_stashes(&self) -> Result<bool> {
        Ok(self.state.borrow().stashes > 0)
    }

    fn commit_messages_since(&self, _tag: Option<&str>) -> Result<Vec<String>> {
        Ok(self.state.borrow().commit_messages.clone())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(format!("tag {}", name))?;
        let mut state = self.state.borrow_mut();
        state.tags.push(name.to_string());
        state.latest_tag = Some(name.to_string());
        Ok(())
    }

    fn exec(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        self.record(command.clone())?;
        let mut state = self.state.borrow_mut();
        match args {
            ["checkout", branch] | ["checkout", "-b", branch, ..] | ["branch", branch, _]
                if !branch.starts_with('-') =>
            {
                if !state.local_branches.iter().any(|b| b == branch) {
                    state.local_branches.push(branch.to_string());
                }
                if args[0] == "checkout" {
                    state.current_branch = branch.to_string();
                }
            }
            [.., "rebase", "--continue"] => {
                if !state.rebasing {
                    return Err(GitWorkflowError::command("No rebase in progress?"));
                }
                state.rebasing = false;
                state.conflicts.clear();
            }
            ["pull", "--rebase", ..] | ["rebase", _] => {
                if let Some(paths) = state.rebase_stop.take() {
                    state.rebasing = true;
                    state.conflicts = paths;
                    return Err(GitWorkflowError::command(format!(
                        "git {} failed: could not apply commit",
                        command
                    )));
                }
            }
            ["commit", ..] => {
                state.changes = false;
                state.unborn = false;
                state.operation = false;
            }
            _ => {}
        }
        Ok(String::new())
    }

    fn stash_push(&self) -> Result<()> {
        self.record("stash push -u".to_string())?;
        let mut state = self.state.borrow_mut();
        if state.changes {
            state.stashes += 1;
            state.changes = false;
        }
        Ok(())
    }

    fn stash_pop(&self) -> Result<()> {
        self.record("stash pop".to_string())?;
        let mut state = self.state.borrow_mut();
        if state.stashes == 0 {
            return Err(GitWorkflowError::command("No stash entries found."));
        }
        state.stashes -= 1;
        state.changes = true;
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.record(format!("branch -D {}", name))?;
        let mut state = self.state.borrow_mut();
        state.local_branches.retain(|b| b != name);
        state.stale_branches.retain(|b| b != name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_basic() {
        let repo = MockRepository::new().with_branch("feature/login");
        assert_eq!(repo.current_branch().unwrap(), "feature/login");
        assert_eq!(repo.local_branches().unwrap().len(), 2);
    }

    #[test]
    fn test_mock_stash_cycle() {
        let repo = MockRepository::new().with_changes(true);
        repo.stash_push().unwrap();
        assert!(!repo.changes().unwrap());
        assert!(repo.has_stashes().unwrap());

        repo.stash_pop().unwrap();
        assert!(repo.changes().unwrap());
        assert!(!repo.has_stashes().unwrap());
        assert_eq!(repo.calls(), vec!["stash push -u", "stash pop"]);
    }

    #[test]
    fn test_mock_conflict_scans_drain() {
        let repo = MockRepository::new().with_conflict_scan(&["a.txt:1: <<<<<<< HEAD"]);
        assert_eq!(repo.conflicts_string().unwrap().len(), 1);
        assert!(repo.conflicts_string().unwrap().is_empty());
    }

    #[test]
    fn test_mock_failing_command() {
        let repo = MockRepository::new().failing("fetch");
        assert!(repo.fetch_all_prune().is_err());
        assert!(repo.exec(&["status", "-sb"]).is_ok());
        assert_eq!(repo.calls(), vec!["fetch --all --prune", "status -sb"]);
    }

    #[test]
    fn test_mock_checkout_switches_branch() {
        let repo = MockRepository::new();
        repo.exec(&["checkout", "-b", "feature/x", "master"]).unwrap();
        assert_eq!(repo.current_branch().unwrap(), "feature/x");
    }

    #[test]
    fn test_mock_stopping_rebase() {
        let repo = MockRepository::new().stopping_rebase(&["src/lib.rs"]);
        assert!(repo.exec(&["rebase", "develop"]).is_err());
        assert!(repo.is_rebasing().unwrap());
        assert_eq!(repo.conflicts().unwrap(), vec!["src/lib.rs"]);

        repo.exec(&["-c", "core.editor=true", "rebase", "--continue"]).unwrap();
        assert!(!repo.is_rebasing().unwrap());
        assert!(repo.conflicts().unwrap().is_empty());
    }

    #[test]
    fn test_mock_first_commit_leaves_unborn_state() {
        let repo = MockRepository::new().unborn().with_changes(true);
        assert!(!repo.has_commits().unwrap());
        repo.exec(&["commit", "-m", "feat: first"]).unwrap();
        assert!(repo.has_commits().unwrap());
        assert!(!repo.changes().unwrap());
    }

    #[test]
    fn test_mock_create_tag() {
        let repo = MockRepository::new().with_tag("v1.0.0");
        repo.create_tag("v1.1.0").unwrap();
        assert_eq!(repo.tags().unwrap(), vec!["v1.0.0", "v1.1.0"]);
        assert_eq!(repo.latest_tag().unwrap(), Some("v1.1.0".to_string()));
    }
}
