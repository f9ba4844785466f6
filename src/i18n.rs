//! Display strings keyed by dotted names.

use std::collections::HashMap;

const EN: &[(&str, &str)] = &[
    ("actions.check", "check"),
    ("actions.status", "status"),
    ("actions.commit", "commit"),
    ("actions.rebase", "rebase"),
    ("actions.setup", "setup"),
    ("actions.helpers", "helpers"),
    ("actions.exit", "exit"),
    ("actions.switch-branch", "switch branch"),
    ("actions.new branch", "new branch"),
    ("actions.sync branch", "sync branch"),
    ("actions.release", "release"),
    ("actions.helpers:clean-up", "clean up"),
    ("actions.helpers:rm-stale-branches", "remove stale branches"),
    ("title.chooseAction", "Choose an action"),
    ("title.chooseHelper", "Choose a helper"),
    ("title.chooseBranch", "Choose a branch to {action}"),
    ("title.chooseBranchType", "Choose a branch type"),
    ("title.done", "done"),
    ("title.conflictsFound", "conflicts found:"),
    ("title.conflictStringsFound", "conflict markers found:"),
    ("title.conflictsResolved", "If conflicts have been resolved, proceed to the next step"),
    ("title.commitMessage", "Commit message"),
    ("title.branchName", "Branch name (after '{prefix}{infix}')"),
    ("title.tagExists", "Tag '{tag}' already exists, input another version"),
    ("title.confirmRelease", "Release {tag}?"),
    ("title.pushTag", "Push {tag} to origin?"),
    ("title.gitInit", "This is not a git repository. \"git init\" now?"),
    ("status.noCommit", "Nothing to commit, working tree clean"),
    ("status.protected", "Current branch is being protected, cannot commit manually"),
    ("status.currentBranch", "current"),
    ("status.flowNotFound", "Flow '{current}' not found, using '{def}'"),
    ("status.noBranch", "You have no branch to {action}"),
    ("status.noBranchType", "Flow '{flow}' defines no short-lived branch types"),
    ("status.staleRemoved", "stale branches {branches} removed"),
    ("status.noStale", "no stale branch"),
    ("status.rebaseInProgress", "A rebase is in progress, choose 'rebase' to continue it"),
    ("status.stashKept", "Your changes are still stashed, run 'git stash pop' to restore them"),
    ("status.versionFailed", "version engine failed with message: {message}"),
    ("status.noVersion", "No version selected, release cancelled"),
    ("status.pushLater", "To push this tag later, run: git push origin {tag}"),
    ("status.branchCreated", "Created branch {branch} from {base}"),
    ("status.branchExists", "Branch {branch} already exists"),
    ("status.setupDone", "All long-lived branches exist"),
    ("status.released", "Released {tag}"),
    ("status.cancelled", "Cancelled"),
];

/// Localized message table
#[derive(Debug, Clone)]
pub struct Messages {
    table: HashMap<&'static str, &'static str>,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            table: EN.iter().copied().collect(),
        }
    }
}

impl Messages {
    /// Message for `key`; the key itself when unknown
    pub fn t(&self, key: &str) -> String {
        self.table
            .get(key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Message for `key` with `{name}` placeholders replaced
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.t(key), |msg, (name, value)| {
                msg.replace(&format!("{{{}}}", name), value)
            })
    }
}
