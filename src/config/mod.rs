//! Session configuration.
//!
//! A [WorkflowConfig] is assembled once per session from three layers, later
//! layers winning: built-in defaults, the preset of the selected [Flow], and
//! the user's `gitworkflow.toml` overrides ([UserConfig]).

pub mod flows;

pub use flows::{Flow, FlowPreset};

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Action, MenuEntry, VersionBump};
use crate::error::{GitWorkflowError, Result};

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "gitworkflow.toml";

/// A persistent branch role such as `master` or `develop`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LongLivedBranch {
    pub name: String,
    #[serde(default)]
    pub protected: bool,
}

/// A branch type identified by its name prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShortLivedBranch {
    #[serde(alias = "baseOn")]
    pub base_on: String,
    #[serde(alias = "mergeTo")]
    pub merge_to: String,
}

/// Branch taxonomy of the active flow
#[derive(Debug, Clone, PartialEq)]
pub struct BranchesConfig {
    /// Trunk branch; fallback base and merge target
    pub main: String,
    /// Separator between a short-lived prefix and the rest of the name
    pub infix: String,
    pub long_lived: BTreeMap<String, LongLivedBranch>,
    pub short_lived: BTreeMap<String, ShortLivedBranch>,
}

impl BranchesConfig {
    /// Long-lived roles marked protected.
    ///
    /// Derived from `long_lived` on every call so it can never go stale.
    pub fn protected(&self) -> BTreeSet<String> {
        self.long_lived
            .iter()
            .filter(|(_, branch)| branch.protected)
            .map(|(role, _)| role.clone())
            .collect()
    }

    /// Whether direct commits to `branch` are forbidden.
    ///
    /// Matches a role in [BranchesConfig::protected] or that role's
    /// configured branch name.
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected().iter().any(|role| {
            role == branch
                || self
                    .long_lived
                    .get(role)
                    .is_some_and(|entry| entry.name == branch)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HooksConfig {
    /// Shown before the main actions
    pub pre: Vec<MenuEntry>,
    /// Shown after the main actions
    pub post: Vec<MenuEntry>,
}

/// Per-category console log toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogsConfig {
    /// "done: <action>" after each successful action
    pub done: bool,
    /// Echo mutating git commands before running them
    pub command: bool,
}

/// How the `release` action picks its version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Pre-release identifier such as "beta"; releases become `x.y.z-beta.N`
    pub prerelease: Option<String>,
    /// Bump kind used instead of the one derived from commits
    pub release_as: Option<VersionBump>,
}

/// Resolved, read-only configuration of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    pub flow: Flow,
    pub actions: Vec<MenuEntry>,
    pub hooks: HooksConfig,
    pub branches: BranchesConfig,
    pub check_conflict_string: bool,
    pub logs: LogsConfig,
    /// Work tree root of the repository
    pub root: PathBuf,
    pub tag_prefix: String,
    pub release: ReleaseConfig,
}

/// Raised when the requested flow is unknown and the default was used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowFallback {
    pub requested: String,
    pub used: Flow,
}

/// Overrides read from the user's config file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UserConfig {
    pub flow: Option<String>,
    #[serde(alias = "default")]
    pub default_flow: Option<String>,
    pub actions: Option<Vec<MenuEntry>>,
    pub hooks: Option<HooksOverride>,
    pub branches: Option<BranchesOverride>,
    #[serde(alias = "checkConflictString")]
    pub check_conflict_string: Option<bool>,
    #[serde(alias = "tagPrefix")]
    pub tag_prefix: Option<String>,
    pub logs: Option<LogsOverride>,
    pub release: Option<ReleaseOverride>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HooksOverride {
    pub pre: Option<Vec<MenuEntry>>,
    pub post: Option<Vec<MenuEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BranchesOverride {
    pub main: Option<String>,
    pub infix: Option<String>,
    /// Entries replace preset entries with the same role
    pub long_lived: Option<BTreeMap<String, LongLivedBranch>>,
    /// Entries replace preset entries with the same prefix
    pub short_lived: Option<BTreeMap<String, ShortLivedBranch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsOverride {
    #[serde(alias = "DONE")]
    pub done: Option<bool>,
    #[serde(alias = "COMMAND")]
    pub command: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReleaseOverride {
    pub prerelease: Option<String>,
    #[serde(alias = "releaseAs")]
    pub release_as: Option<VersionBump>,
}

/// Settings that no flow preset decides.
#[derive(Debug, Clone)]
struct Defaults {
    flow: Flow,
    hooks: HooksConfig,
    check_conflict_string: bool,
    logs: LogsConfig,
    tag_prefix: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            flow: Flow::GithubFlow,
            hooks: HooksConfig {
                pre: vec![MenuEntry::Action(Action::Check)],
                post: vec![
                    MenuEntry::Action(Action::Helpers),
                    MenuEntry::Action(Action::Exit),
                ],
            },
            check_conflict_string: true,
            logs: LogsConfig {
                done: true,
                command: false,
            },
            tag_prefix: "v".to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Layers defaults, the flow preset and `user`, then validates the result.
    ///
    /// `flow_override` (from the command line) beats the file's `flow`.
    /// An unknown flow name falls back to `default-flow` and is reported in
    /// the returned [FlowFallback]; an unknown `default-flow` is an error.
    pub fn resolve(
        user: UserConfig,
        flow_override: Option<&str>,
        root: PathBuf,
    ) -> Result<(Self, Option<FlowFallback>)> {
        let defaults = Defaults::default();

        let default_flow = match user.default_flow.as_deref() {
            Some(name) => name.parse::<Flow>()?,
            None => defaults.flow,
        };

        let requested = flow_override.map(str::to_string).or(user.flow.clone());
        let (flow, fallback) = match requested {
            Some(name) => match name.parse::<Flow>() {
                Ok(flow) => (flow, None),
                Err(_) => (
                    default_flow,
                    Some(FlowFallback {
                        requested: name,
                        used: default_flow,
                    }),
                ),
            },
            None => (default_flow, None),
        };

        let FlowPreset {
            actions,
            mut branches,
        } = flow.preset();

        let mut hooks = defaults.hooks;
        if let Some(overrides) = user.hooks {
            if let Some(pre) = overrides.pre {
                hooks.pre = pre;
            }
            if let Some(post) = overrides.post {
                hooks.post = post;
            }
        }

        if let Some(overrides) = user.branches {
            if let Some(main) = overrides.main {
                branches.main = main;
            }
            if let Some(infix) = overrides.infix {
                branches.infix = infix;
            }
            branches.long_lived.extend(overrides.long_lived.unwrap_or_default());
            branches
                .short_lived
                .extend(overrides.short_lived.unwrap_or_default());
        }

        let mut logs = defaults.logs;
        if let Some(overrides) = user.logs {
            logs.done = overrides.done.unwrap_or(logs.done);
            logs.command = overrides.command.unwrap_or(logs.command);
        }

        let config = WorkflowConfig {
            flow,
            actions: user.actions.unwrap_or(actions),
            hooks,
            branches,
            check_conflict_string: user
                .check_conflict_string
                .unwrap_or(defaults.check_conflict_string),
            logs,
            root,
            tag_prefix: user.tag_prefix.unwrap_or(defaults.tag_prefix),
            release: user
                .release
                .map(|release| ReleaseConfig {
                    prerelease: release.prerelease,
                    release_as: release.release_as,
                })
                .unwrap_or_default(),
        };
        config.validate()?;

        Ok((config, fallback))
    }

    /// Configuration of `flow` with no user overrides
    pub fn for_flow(flow: Flow, root: PathBuf) -> Self {
        let FlowPreset { actions, branches } = flow.preset();
        let defaults = Defaults::default();
        WorkflowConfig {
            flow,
            actions,
            hooks: defaults.hooks,
            branches,
            check_conflict_string: defaults.check_conflict_string,
            logs: defaults.logs,
            root,
            tag_prefix: defaults.tag_prefix,
            release: ReleaseConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.branches.main.trim().is_empty() {
            return Err(GitWorkflowError::config("branches.main must not be empty"));
        }
        if self.branches.infix.is_empty() {
            return Err(GitWorkflowError::config("branches.infix must not be empty"));
        }
        for (role, branch) in &self.branches.long_lived {
            if branch.name.trim().is_empty() {
                return Err(GitWorkflowError::config(format!(
                    "branches.long-lived.{} has an empty name",
                    role
                )));
            }
        }
        for (prefix, kind) in &self.branches.short_lived {
            if kind.base_on.trim().is_empty() || kind.merge_to.trim().is_empty() {
                return Err(GitWorkflowError::config(format!(
                    "branches.short-lived.{} needs both base-on and merge-to",
                    prefix
                )));
            }
        }
        if let Some(id) = &self.release.prerelease {
            let valid = !id.is_empty()
                && id.split('.').all(|part| {
                    !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                });
            if !valid {
                return Err(GitWorkflowError::config(format!(
                    "release.prerelease '{}' is not a valid pre-release identifier",
                    id
                )));
            }
        }
        if !self.actions.iter().any(|entry| entry.action().is_some()) {
            return Err(GitWorkflowError::config("actions must name at least one action"));
        }
        Ok(())
    }
}

/// Loads user overrides from file, or none when no file is found.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `gitworkflow.toml` in current directory
/// 3. `.gitworkflow.toml` in the user config directory
pub fn load_config(config_path: Option<&str>) -> Result<UserConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(UserConfig::default());
        }
    } else {
        return Ok(UserConfig::default());
    };

    let config: UserConfig = toml::from_str(&config_str)?;
    Ok(config)
}
