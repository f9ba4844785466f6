//! Built-in branching convention presets.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{BranchesConfig, LongLivedBranch, ShortLivedBranch};
use crate::domain::{Action, MenuEntry};
use crate::error::GitWorkflowError;

/// A named branching convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    NoFlow,
    GitFlow,
    GithubFlow,
    GitlabFlow,
}

/// The part of the configuration a flow decides
#[derive(Debug, Clone, PartialEq)]
pub struct FlowPreset {
    pub actions: Vec<MenuEntry>,
    pub branches: BranchesConfig,
}

impl Flow {
    pub const ALL: [Flow; 4] = [Flow::NoFlow, Flow::GitFlow, Flow::GithubFlow, Flow::GitlabFlow];

    pub fn key(&self) -> &'static str {
        match self {
            Flow::NoFlow => "no-flow",
            Flow::GitFlow => "git-flow",
            Flow::GithubFlow => "github-flow",
            Flow::GitlabFlow => "gitlab-flow",
        }
    }

    pub fn preset(&self) -> FlowPreset {
        match self {
            Flow::NoFlow => FlowPreset {
                actions: entries(&[Action::Status, Action::Commit, Action::SyncBranch, Action::Release]),
                branches: branches(&[("master", false)], &[]),
            },
            Flow::GitFlow => FlowPreset {
                actions: entries(&[
                    Action::Status,
                    Action::Commit,
                    Action::NewBranch,
                    Action::SwitchBranch,
                    Action::SyncBranch,
                    Action::Rebase,
                    Action::Release,
                    Action::Setup,
                ]),
                branches: branches(
                    &[("master", true), ("develop", true)],
                    &[
                        ("feature", "develop", "develop"),
                        ("bugfix", "develop", "develop"),
                        ("release", "develop", "master"),
                        ("hotfix", "master", "master"),
                    ],
                ),
            },
            Flow::GithubFlow => FlowPreset {
                actions: entries(&[
                    Action::Status,
                    Action::Commit,
                    Action::NewBranch,
                    Action::SwitchBranch,
                    Action::SyncBranch,
                    Action::Rebase,
                    Action::Release,
                ]),
                branches: branches(
                    &[("master", true)],
                    &[("feature", "master", "master"), ("fix", "master", "master")],
                ),
            },
            Flow::GitlabFlow => FlowPreset {
                actions: entries(&[
                    Action::Status,
                    Action::Commit,
                    Action::NewBranch,
                    Action::SwitchBranch,
                    Action::SyncBranch,
                    Action::Rebase,
                    Action::Release,
                    Action::Setup,
                ]),
                branches: branches(
                    &[("master", true), ("pre-production", true), ("production", true)],
                    &[("feature", "master", "master"), ("hotfix", "master", "master")],
                ),
            },
        }
    }
}

impl FromStr for Flow {
    type Err = GitWorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flow::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s)
            .ok_or_else(|| GitWorkflowError::config(format!("unknown flow '{}'", s)))
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn entries(actions: &[Action]) -> Vec<MenuEntry> {
    actions.iter().copied().map(MenuEntry::Action).collect()
}

fn branches(long_lived: &[(&str, bool)], short_lived: &[(&str, &str, &str)]) -> BranchesConfig {
    BranchesConfig {
        main: "master".to_string(),
        infix: "/".to_string(),
        long_lived: long_lived
            .iter()
            .map(|(name, protected)| {
                (
                    name.to_string(),
                    LongLivedBranch {
                        name: name.to_string(),
                        protected: *protected,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
        short_lived: short_lived
            .iter()
            .map(|(prefix, base_on, merge_to)| {
                (
                    prefix.to_string(),
                    ShortLivedBranch {
                        base_on: base_on.to_string(),
                        merge_to: merge_to.to_string(),
                    },
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_keys_parse() {
        for flow in Flow::ALL {
            assert_eq!(flow.key().parse::<Flow>().unwrap(), flow);
        }
        assert!("trunk-flow".parse::<Flow>().is_err());
    }

    #[test]
    fn test_git_flow_release_merges_to_master() {
        let preset = Flow::GitFlow.preset();
        let release = &preset.branches.short_lived["release"];
        assert_eq!(release.base_on, "develop");
        assert_eq!(release.merge_to, "master");
    }

    #[test]
    fn test_short_lived_targets_are_long_lived() {
        for flow in Flow::ALL {
            let preset = flow.preset();
            for kind in preset.branches.short_lived.values() {
                assert!(preset.branches.long_lived.contains_key(&kind.base_on));
                assert!(preset.branches.long_lived.contains_key(&kind.merge_to));
            }
        }
    }
}
