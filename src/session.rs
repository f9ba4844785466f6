//! The interactive loop: menu, hook-bracketed dispatch, repeat.

use crate::config::WorkflowConfig;
use crate::context::Context;
use crate::domain::{Action, Helper, MenuEntry, Selection};
use crate::error::{GitWorkflowError, Result};
use crate::flows;
use crate::hooks::{HookExecutor, HookType};
use crate::ui;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked `exit`
    Exit,
    /// The user declined a blocking confirmation
    Aborted,
}

/// Menu in display order: pre-hook actions, divider, actions, divider,
/// post-hook actions. Empty hook lists get no divider.
pub fn build_menu(config: &WorkflowConfig) -> Vec<MenuEntry> {
    let mut menu = Vec::new();
    if !config.hooks.pre.is_empty() {
        menu.extend(config.hooks.pre.iter().cloned());
        menu.push(MenuEntry::Separator);
    }
    menu.extend(config.actions.iter().cloned());
    if !config.hooks.post.is_empty() {
        menu.push(MenuEntry::Separator);
        menu.extend(config.hooks.post.iter().cloned());
    }
    menu
}

fn label(ctx: &Context, entry: &MenuEntry) -> String {
    match entry {
        MenuEntry::Action(action) => ctx.t(&format!("actions.{}", action.key())),
        MenuEntry::Separator => ui::separator_label(),
        MenuEntry::Labeled { name, .. } => name.clone(),
    }
}

/// Asks for the next selection. A picked divider asks again; `helpers` opens
/// the helper sub-menu.
pub fn choose(ctx: &Context, menu: &[MenuEntry]) -> Result<Selection> {
    let labels: Vec<String> = menu.iter().map(|entry| label(ctx, entry)).collect();
    loop {
        let index = ctx
            .prompter
            .select(&ctx.question("title.chooseAction")?, &labels)?;
        match menu.get(index).and_then(MenuEntry::action) {
            Some(Action::Helpers) => return choose_helper(ctx),
            Some(action) => return Ok(Selection::Action(action)),
            None => continue,
        }
    }
}

fn choose_helper(ctx: &Context) -> Result<Selection> {
    let labels: Vec<String> = Helper::ALL
        .iter()
        .map(|helper| ctx.t(&format!("actions.{}", Selection::Helper(*helper).key())))
        .collect();
    let index = ctx
        .prompter
        .select(&ctx.question("title.chooseHelper")?, &labels)?;
    Helper::ALL
        .get(index)
        .map(|helper| Selection::Helper(*helper))
        .ok_or_else(|| GitWorkflowError::prompt(format!("no helper at index {}", index)))
}

/// Runs `selection` between the pre and post hooks.
///
/// The post hook runs after a failed pre hook or handler too. Only an abort
/// skips it: the index is then still unmerged and the stash stays put.
pub fn dispatch(ctx: &Context, selection: Selection) -> Result<()> {
    let outcome = HookExecutor::run(HookType::Pre, ctx).and_then(|()| flows::run(ctx, selection));
    if matches!(&outcome, Err(e) if e.is_aborted()) {
        return outcome;
    }

    let post = HookExecutor::run(HookType::Post, ctx);
    match (outcome, post) {
        (Err(e), Err(post_err)) => {
            tracing::warn!(error = %post_err, "post hook failed after a failed action");
            ui::display_failure(&post_err);
            Err(e)
        }
        (outcome, post) => outcome.and(post),
    }
}

/// "done: <action>" for a successful action, when that log is enabled
fn completion_line(ctx: &Context, action: &str, outcome: &Result<()>) -> Option<String> {
    if outcome.is_err() || !ctx.config.logs.done {
        return None;
    }
    Some(format!("{}: {}", ctx.t("title.done"), action))
}

/// Presents the menu until the user exits or aborts.
///
/// Action failures are reported and the menu comes back; prompt failures end
/// the session with an error.
pub fn run_session(ctx: &Context) -> Result<SessionEnd> {
    let menu = build_menu(ctx.config);
    tracing::debug!(entries = menu.len(), flow = %ctx.config.flow, "session started");

    loop {
        let selection = choose(ctx, &menu)?;
        if selection == Selection::Action(Action::Exit) {
            return Ok(SessionEnd::Exit);
        }

        let action = ctx.t(&format!("actions.{}", selection.key()));
        let outcome = dispatch(ctx, selection);
        if let Some(line) = completion_line(ctx, &action, &outcome) {
            ui::display_done(&line);
        }
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_aborted() => {
                tracing::debug!(action = %selection.key(), "aborted by user");
                if ctx.hook_stash_pending() {
                    ui::display_warning(&ctx.t("status.stashKept"));
                }
                return Ok(SessionEnd::Aborted);
            }
            Err(e) => {
                tracing::warn!(action = %selection.key(), error = %e, "action failed");
                ui::display_failure(&e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Flow, HooksConfig};
    use crate::context::with_test_context;
    use crate::git::MockRepository;
    use crate::ui::{Answer, ScriptedPrompter};
    use std::path::PathBuf;

    fn config() -> WorkflowConfig {
        WorkflowConfig::for_flow(Flow::GitFlow, PathBuf::from("/repo"))
    }

    #[test]
    fn test_menu_order_with_hooks() {
        let mut config = config();
        config.actions = vec![Action::Commit.into(), Action::SyncBranch.into()];
        config.hooks = HooksConfig {
            pre: vec![Action::Check.into()],
            post: vec![Action::Helpers.into()],
        };
        assert_eq!(
            build_menu(&config),
            vec![
                MenuEntry::Action(Action::Check),
                MenuEntry::Separator,
                MenuEntry::Action(Action::Commit),
                MenuEntry::Action(Action::SyncBranch),
                MenuEntry::Separator,
                MenuEntry::Action(Action::Helpers),
            ]
        );
    }

    #[test]
    fn test_menu_without_hooks_has_no_dividers() {
        let mut config = config();
        config.actions = vec![Action::Status.into()];
        config.hooks = HooksConfig {
            pre: Vec::new(),
            post: Vec::new(),
        };
        assert_eq!(build_menu(&config), vec![MenuEntry::Action(Action::Status)]);
    }

    #[test]
    fn test_separator_is_asked_again() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::new([Answer::Select(1), Answer::Select(0)]);
        let menu = vec![
            MenuEntry::Action(Action::Status),
            MenuEntry::Separator,
        ];
        let selection =
            with_test_context(&repo, &prompter, &config(), |ctx| choose(ctx, &menu)).unwrap();
        assert_eq!(selection, Selection::Action(Action::Status));
        assert_eq!(prompter.asked().len(), 2);
    }

    #[test]
    fn test_helpers_opens_sub_menu() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::new([
            Answer::choose("helpers"),
            Answer::choose("remove stale branches"),
        ]);
        let menu = build_menu(&config());
        let selection =
            with_test_context(&repo, &prompter, &config(), |ctx| choose(ctx, &menu)).unwrap();
        assert_eq!(selection, Selection::Helper(Helper::RmStaleBranches));
        assert_eq!(prompter.menus()[1], vec!["clean up", "remove stale branches"]);
    }

    #[test]
    fn test_labeled_entry_uses_its_name() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::new([Answer::choose("Ship it")]);
        let menu = vec![MenuEntry::Labeled {
            name: "Ship it".to_string(),
            value: Action::Release,
        }];
        let selection =
            with_test_context(&repo, &prompter, &config(), |ctx| choose(ctx, &menu)).unwrap();
        assert_eq!(selection, Selection::Action(Action::Release));
    }

    #[test]
    fn test_dispatch_pops_after_failed_handler() {
        let repo = MockRepository::new()
            .with_branch("feature/a")
            .with_changes(true)
            .failing("rebase");
        let prompter = ScriptedPrompter::default();
        let result = with_test_context(&repo, &prompter, &config(), |ctx| {
            dispatch(ctx, Selection::Action(Action::Rebase))
        });
        assert!(result.is_err());
        assert_eq!(
            repo.calls(),
            vec!["stash push -u", "fetch --all --prune", "rebase develop", "stash pop"]
        );
    }

    #[test]
    fn test_dispatch_pops_after_failed_pre_hook() {
        let repo = MockRepository::new().with_changes(true).failing("fetch");
        let prompter = ScriptedPrompter::default();
        let result = with_test_context(&repo, &prompter, &config(), |ctx| {
            dispatch(ctx, Selection::Action(Action::Status))
        });
        assert!(result.is_err());
        assert_eq!(
            repo.calls(),
            vec!["stash push -u", "fetch --all --prune", "stash pop"]
        );
    }

    #[test]
    fn test_session_exit_runs_no_hooks() {
        let repo = MockRepository::new().with_changes(true);
        let prompter = ScriptedPrompter::new([Answer::choose("exit")]);
        let end = with_test_context(&repo, &prompter, &config(), |ctx| run_session(ctx)).unwrap();
        assert_eq!(end, SessionEnd::Exit);
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_session_continues_after_failure() {
        let repo = MockRepository::new().failing("gc");
        let prompter = ScriptedPrompter::new([
            Answer::choose("helpers"),
            Answer::choose("clean up"),
            Answer::choose("exit"),
        ]);
        let end = with_test_context(&repo, &prompter, &config(), |ctx| run_session(ctx)).unwrap();
        assert_eq!(end, SessionEnd::Exit);
        assert_eq!(repo.calls(), vec!["fetch --all --prune", "gc"]);
    }

    #[test]
    fn test_session_abort_ends_without_post_hook() {
        let repo = MockRepository::new()
            .with_changes(true)
            .with_conflicts(&["a.txt"]);
        let prompter = ScriptedPrompter::new([Answer::choose("check"), Answer::Confirm(false)]);
        let end = with_test_context(&repo, &prompter, &config(), |ctx| run_session(ctx)).unwrap();
        assert_eq!(end, SessionEnd::Aborted);
        assert_eq!(repo.calls(), vec!["fetch --all --prune"]);
    }

    #[test]
    fn test_completion_line_only_after_success() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::default();
        let mut quiet = config();
        quiet.logs.done = false;

        with_test_context(&repo, &prompter, &config(), |ctx| {
            assert_eq!(
                completion_line(ctx, "commit", &Ok(())),
                Some("done: commit".to_string())
            );
            let failed = Err(GitWorkflowError::command("git commit failed"));
            assert_eq!(completion_line(ctx, "commit", &failed), None);
        });
        with_test_context(&repo, &prompter, &quiet, |ctx| {
            assert_eq!(completion_line(ctx, "commit", &Ok(())), None);
        });
    }

    #[test]
    fn test_session_prompt_failure_is_an_error() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::default();
        assert!(with_test_context(&repo, &prompter, &config(), |ctx| run_session(ctx)).is_err());
    }
}
