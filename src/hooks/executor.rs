use crate::context::{Context, HookStash};
use crate::error::Result;
use crate::hooks::HookType;

/// Runs the action hooks against the session's repository
pub struct HookExecutor;

impl HookExecutor {
    /// Execute one hook.
    ///
    /// Pre skips the stash while a merge, rebase or similar operation is
    /// underway or conflicts are pending: stashing would drop the operation's
    /// state. It also skips it before the first commit, where git has nothing
    /// to stash against. Post pops whenever a stash exists, unless the handler
    /// already popped the one pre pushed.
    pub fn run(hook: HookType, ctx: &Context) -> Result<()> {
        tracing::debug!(hook = %hook, "running hook");
        match hook {
            HookType::Pre => Self::pre(ctx),
            HookType::Post => Self::post(ctx),
        }
    }

    fn pre(ctx: &Context) -> Result<()> {
        ctx.set_hook_stash(HookStash::None);

        let unmerged = ctx.repo.operation_in_progress()? || !ctx.repo.conflicts()?.is_empty();
        if unmerged {
            tracing::debug!("operation in progress, not stashing");
        } else if !ctx.repo.has_commits()? {
            tracing::debug!("no initial commit, not stashing");
        } else if ctx.repo.changes()? {
            ctx.echo(&["stash", "push", "-u"]);
            ctx.repo.stash_push()?;
            ctx.set_hook_stash(HookStash::Pushed);
        }

        ctx.echo(&["fetch", "--all", "--prune"]);
        ctx.repo.fetch_all_prune()
    }

    fn post(ctx: &Context) -> Result<()> {
        let restored = ctx.hook_stash() == HookStash::Restored;
        ctx.set_hook_stash(HookStash::None);
        if !restored && ctx.repo.has_stashes()? {
            ctx.echo(&["stash", "pop"]);
            ctx.repo.stash_pop()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Flow, WorkflowConfig};
    use crate::git::MockRepository;
    use crate::i18n::Messages;
    use crate::ui::ScriptedPrompter;
    use crate::version::ConventionalEngine;
    use std::path::PathBuf;

    fn with_ctx(repo: &MockRepository, f: impl FnOnce(&Context)) {
        let config = WorkflowConfig::for_flow(Flow::GithubFlow, PathBuf::from("/repo"));
        let messages = Messages::default();
        let prompter = ScriptedPrompter::default();
        let engine = ConventionalEngine::new(repo);
        let ctx = Context::new(repo, &prompter, &engine, &config, &messages);
        f(&ctx);
    }

    #[test]
    fn test_pre_stashes_changes_then_fetches() {
        let repo = MockRepository::new().with_changes(true);
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Pre, ctx).unwrap());
        assert_eq!(repo.calls(), vec!["stash push -u", "fetch --all --prune"]);
        assert_eq!(repo.stash_count(), 1);
    }

    #[test]
    fn test_pre_on_clean_tree_only_fetches() {
        let repo = MockRepository::new();
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Pre, ctx).unwrap());
        assert_eq!(repo.calls(), vec!["fetch --all --prune"]);
    }

    #[test]
    fn test_pre_never_stashes_unmerged_index() {
        let repo = MockRepository::new()
            .with_changes(true)
            .with_conflicts(&["src/a.rs"]);
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Pre, ctx).unwrap());
        assert_eq!(repo.calls(), vec!["fetch --all --prune"]);
    }

    #[test]
    fn test_pre_keeps_staged_merge_resolution() {
        let repo = MockRepository::new()
            .with_changes(true)
            .with_operation_in_progress(true);
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Pre, ctx).unwrap());
        assert_eq!(repo.calls(), vec!["fetch --all --prune"]);
        assert_eq!(repo.stash_count(), 0);
    }

    #[test]
    fn test_pre_before_first_commit_only_fetches() {
        let repo = MockRepository::new().unborn().with_changes(true);
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Pre, ctx).unwrap());
        assert_eq!(repo.calls(), vec!["fetch --all --prune"]);
    }

    #[test]
    fn test_post_pops_existing_stash() {
        let repo = MockRepository::new().with_stashes(1);
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Post, ctx).unwrap());
        assert_eq!(repo.calls(), vec!["stash pop"]);
        assert_eq!(repo.stash_count(), 0);
    }

    #[test]
    fn test_post_without_stash_is_noop() {
        let repo = MockRepository::new();
        with_ctx(&repo, |ctx| HookExecutor::run(HookType::Post, ctx).unwrap());
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_pre_marks_stash_for_restore() {
        let repo = MockRepository::new().with_changes(true);
        with_ctx(&repo, |ctx| {
            HookExecutor::run(HookType::Pre, ctx).unwrap();
            assert!(ctx.restore_hook_stash().unwrap());
            assert!(!ctx.restore_hook_stash().unwrap());
        });
        assert_eq!(repo.stash_count(), 0);
    }

    #[test]
    fn test_post_leaves_older_stash_after_restore() {
        let repo = MockRepository::new().with_changes(true).with_stashes(1);
        with_ctx(&repo, |ctx| {
            HookExecutor::run(HookType::Pre, ctx).unwrap();
            ctx.restore_hook_stash().unwrap();
            HookExecutor::run(HookType::Post, ctx).unwrap();
        });
        assert_eq!(repo.stash_count(), 1);
    }
}
