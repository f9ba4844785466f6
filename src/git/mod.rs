//! Git operations abstraction layer
//!
//! The [Repository] trait is everything the workflow engine reads from or
//! does to the underlying repository. Nothing read through it is cached: the
//! repository is the source of truth and may change between calls.
//!
//! - [repository::Git2Repository]: reads through `git2`, mutates through the
//!   `git` binary
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! ```rust
//! # use git_workflow::git::Repository;
//! # fn example(repo: &dyn Repository) -> git_workflow::Result<()> {
//! if repo.changes()? {
//!     repo.stash_push()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::PathBuf;

/// Status reads and mutation primitives over a repository.
///
/// Mutations that map onto a single `git` invocation have default
/// implementations in terms of [Repository::exec].
pub trait Repository {
    /// Work tree root
    fn root(&self) -> Result<PathBuf>;

    /// Short name of the checked-out branch (`HEAD` when detached)
    fn current_branch(&self) -> Result<String>;

    /// Whether tracked or untracked changes exist in the work tree or index
    fn changes(&self) -> Result<bool>;

    /// Whether a rebase is in progress
    fn is_rebasing(&self) -> Result<bool>;

    /// Whether HEAD points at a commit; false on a freshly initialised repository
    fn has_commits(&self) -> Result<bool>;

    /// Whether a merge, cherry-pick, revert, rebase or similar is underway
    fn operation_in_progress(&self) -> Result<bool>;

    /// Paths with unresolved merge conflicts; empty when none
    fn conflicts(&self) -> Result<Vec<String>>;

    /// Leftover conflict markers in tracked files as `path:line: marker`;
    /// empty when none
    fn conflicts_string(&self) -> Result<Vec<String>>;

    /// Local branches whose upstream has disappeared from the remote
    fn stale_branches(&self) -> Result<Vec<String>>;

    /// All local branch names
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Nearest tag reachable from HEAD
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Every tag name in the repository
    fn tags(&self) -> Result<Vec<String>>;

    /// Whether at least one stash entry exists
    fn has_stashes(&self) -> Result<bool>;

    /// Messages of commits reachable from HEAD but not from `tag`, oldest first
    fn commit_messages_since(&self, tag: Option<&str>) -> Result<Vec<String>>;

    /// Creates a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Runs `git <args>` in the work tree and returns its stdout.
    /// A non-zero exit status is an error.
    fn exec(&self, args: &[&str]) -> Result<String>;

    /// Stashes tracked and untracked changes
    fn stash_push(&self) -> Result<()> {
        self.exec(&["stash", "push", "-u"]).map(|_| ())
    }

    fn stash_pop(&self) -> Result<()> {
        self.exec(&["stash", "pop"]).map(|_| ())
    }

    /// Fetches every remote, pruning deleted remote branches
    fn fetch_all_prune(&self) -> Result<()> {
        self.exec(&["fetch", "--all", "--prune"]).map(|_| ())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.exec(&["branch", "-D", name]).map(|_| ())
    }

    fn garbage_collect(&self) -> Result<()> {
        self.exec(&["gc"]).map(|_| ())
    }
}
