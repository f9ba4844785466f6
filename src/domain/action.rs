use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::GitWorkflowError;

/// Literal used in `actions`/`hooks` lists for a visual divider.
pub const SEPARATOR: &str = "---";

/// The closed set of actions a session can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Check,
    Status,
    Commit,
    Rebase,
    Setup,
    Helpers,
    Exit,
    SwitchBranch,
    NewBranch,
    SyncBranch,
    Release,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Check,
        Action::Status,
        Action::Commit,
        Action::Rebase,
        Action::Setup,
        Action::Helpers,
        Action::Exit,
        Action::SwitchBranch,
        Action::NewBranch,
        Action::SyncBranch,
        Action::Release,
    ];

    /// Name as written in config files
    pub fn key(&self) -> &'static str {
        match self {
            Action::Check => "check",
            Action::Status => "status",
            Action::Commit => "commit",
            Action::Rebase => "rebase",
            Action::Setup => "setup",
            Action::Helpers => "helpers",
            Action::Exit => "exit",
            Action::SwitchBranch => "switch-branch",
            Action::NewBranch => "new branch",
            Action::SyncBranch => "sync branch",
            Action::Release => "release",
        }
    }
}

impl FromStr for Action {
    type Err = GitWorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.key() == s)
            .ok_or_else(|| GitWorkflowError::config(format!("unknown action '{}'", s)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Sub-actions offered behind the `helpers` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    CleanUp,
    RmStaleBranches,
}

impl Helper {
    pub const ALL: [Helper; 2] = [Helper::CleanUp, Helper::RmStaleBranches];

    pub fn key(&self) -> &'static str {
        match self {
            Helper::CleanUp => "clean-up",
            Helper::RmStaleBranches => "rm-stale-branches",
        }
    }
}

/// What the user finally picked from the menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Action(Action),
    Helper(Helper),
}

impl Selection {
    /// Canonical action key, `helpers:<sub>` for helper sub-actions
    pub fn key(&self) -> String {
        match self {
            Selection::Action(action) => action.key().to_string(),
            Selection::Helper(helper) => format!("helpers:{}", helper.key()),
        }
    }
}

/// One row of the action menu. Order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMenuEntry")]
pub enum MenuEntry {
    Action(Action),
    Separator,
    /// An action shown under a fixed label instead of its localized name
    Labeled { name: String, value: Action },
}

impl MenuEntry {
    pub fn action(&self) -> Option<Action> {
        match self {
            MenuEntry::Action(action) | MenuEntry::Labeled { value: action, .. } => Some(*action),
            MenuEntry::Separator => None,
        }
    }
}

impl From<Action> for MenuEntry {
    fn from(action: Action) -> Self {
        MenuEntry::Action(action)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMenuEntry {
    Name(String),
    Pair { name: String, value: String },
}

impl TryFrom<RawMenuEntry> for MenuEntry {
    type Error = GitWorkflowError;

    fn try_from(raw: RawMenuEntry) -> Result<Self, Self::Error> {
        match raw {
            RawMenuEntry::Name(name) if name == SEPARATOR => Ok(MenuEntry::Separator),
            RawMenuEntry::Name(name) => name.parse().map(MenuEntry::Action),
            RawMenuEntry::Pair { name, value } => Ok(MenuEntry::Labeled {
                name,
                value: value.parse()?,
            }),
        }
    }
}
