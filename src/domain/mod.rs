//! Domain logic - pure rules independent of git operations

pub mod action;
pub mod branch;
pub mod tag;
pub mod version;

pub use action::{Action, Helper, MenuEntry, Selection, SEPARATOR};
pub use branch::{base_on_branch, compose_branch_name, merge_to_branch, BranchName};
pub use tag::Tag;
pub use version::{BumpOptions, ReleaseAs, VersionBump};
