use std::cell::Cell;

use crate::config::WorkflowConfig;
use crate::error::Result;
use crate::git::Repository;
use crate::i18n::Messages;
use crate::ui::{self, Prompter};
use crate::version::VersionEngine;

/// What became of the pre-action hook's stash during one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStash {
    /// Nothing was stashed
    None,
    /// Stashed and still on the stack
    Pushed,
    /// Stashed, then popped by the handler itself
    Restored,
}

/// Everything a workflow step may touch, passed explicitly to every call.
pub struct Context<'a> {
    pub repo: &'a dyn Repository,
    pub prompter: &'a dyn Prompter,
    pub engine: &'a dyn VersionEngine,
    pub config: &'a WorkflowConfig,
    pub messages: &'a Messages,
    hook_stash: Cell<HookStash>,
}

impl<'a> Context<'a> {
    pub fn new(
        repo: &'a dyn Repository,
        prompter: &'a dyn Prompter,
        engine: &'a dyn VersionEngine,
        config: &'a WorkflowConfig,
        messages: &'a Messages,
    ) -> Self {
        Context {
            repo,
            prompter,
            engine,
            config,
            messages,
            hook_stash: Cell::new(HookStash::None),
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.messages.t(key)
    }

    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.messages.t_with(key, params)
    }

    /// `[branch][flow]` for the current branch
    pub fn prompt_prefix(&self) -> Result<String> {
        Ok(self.prompt_prefix_for(&self.repo.current_branch()?))
    }

    pub fn prompt_prefix_for(&self, branch: &str) -> String {
        ui::prompt_prefix(branch, self.config.flow.key())
    }

    /// Prefixed prompt message
    pub fn question(&self, key: &str) -> Result<String> {
        Ok(format!("{} {}", self.prompt_prefix()?, self.t(key)))
    }

    /// Prints `git <args>` when command logging is on
    pub fn echo(&self, args: &[&str]) {
        if self.config.logs.command {
            ui::display_command(args);
        }
    }

    /// Runs `git <args>`, echoing it first when command logging is on
    pub fn git(&self, args: &[&str]) -> Result<String> {
        self.echo(args);
        self.repo.exec(args)
    }

    /// Whether the pre-action hook's stash is still on the stack
    pub fn hook_stash_pending(&self) -> bool {
        self.hook_stash.get() == HookStash::Pushed
    }

    pub(crate) fn hook_stash(&self) -> HookStash {
        self.hook_stash.get()
    }

    pub(crate) fn set_hook_stash(&self, state: HookStash) {
        self.hook_stash.set(state);
    }

    /// Pops the stash the pre-action hook pushed, if it pushed one.
    ///
    /// For flows that act on the user's uncommitted changes (commit, status).
    pub fn restore_hook_stash(&self) -> Result<bool> {
        if self.hook_stash.get() != HookStash::Pushed {
            return Ok(false);
        }
        self.echo(&["stash", "pop"]);
        self.repo.stash_pop()?;
        self.hook_stash.set(HookStash::Restored);
        Ok(true)
    }
}

/// Context over test doubles, for unit tests of the flows
#[cfg(test)]
pub(crate) fn with_test_context<R>(
    repo: &crate::git::MockRepository,
    prompter: &crate::ui::ScriptedPrompter,
    config: &WorkflowConfig,
    f: impl FnOnce(&Context) -> R,
) -> R {
    let messages = Messages::default();
    let engine = crate::version::ConventionalEngine::new(repo);
    let ctx = Context::new(repo, prompter, &engine, config, &messages);
    f(&ctx)
}
