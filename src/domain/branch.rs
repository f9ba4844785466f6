use crate::config::{BranchesConfig, ShortLivedBranch};

/// A branch name split on the configured infix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName<'a> {
    pub name: &'a str,
    /// Substring before the first infix; the whole name when there is no infix
    pub prefix: &'a str,
}

impl<'a> BranchName<'a> {
    pub fn parse(name: &'a str, infix: &str) -> Self {
        let prefix = if infix.is_empty() {
            name
        } else {
            name.split(infix).next().unwrap_or(name)
        };
        BranchName { name, prefix }
    }

    /// The short-lived branch type this name belongs to, if registered
    pub fn kind<'c>(&self, branches: &'c BranchesConfig) -> Option<&'c ShortLivedBranch> {
        branches.short_lived.get(self.prefix)
    }
}

/// Branch that `branch` should be created from.
///
/// Unregistered prefixes and long-lived branches fall back to `branches.main`.
pub fn base_on_branch<'c>(branch: &str, branches: &'c BranchesConfig) -> &'c str {
    BranchName::parse(branch, &branches.infix)
        .kind(branches)
        .map(|kind| kind.base_on.as_str())
        .unwrap_or(branches.main.as_str())
}

/// Branch that `branch` should be merged into.
///
/// Unregistered prefixes and long-lived branches fall back to `branches.main`.
pub fn merge_to_branch<'c>(branch: &str, branches: &'c BranchesConfig) -> &'c str {
    BranchName::parse(branch, &branches.infix)
        .kind(branches)
        .map(|kind| kind.merge_to.as_str())
        .unwrap_or(branches.main.as_str())
}

/// Joins a short-lived prefix and a suffix with the infix
pub fn compose_branch_name(prefix: &str, infix: &str, suffix: &str) -> String {
    format!("{}{}{}", prefix, infix, suffix)
}
