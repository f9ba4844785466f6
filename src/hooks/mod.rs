//! Workspace synchronisation around every dispatched action
//!
//! - pre: stash uncommitted (tracked and untracked) changes, then fetch all
//!   remotes with pruning
//! - post: pop the stash when one exists

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::HookType;
