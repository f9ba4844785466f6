use crate::commit_gate::can_commit;
use crate::context::Context;
use crate::error::Result;
use crate::ui;

/// Commits the working tree, putting back changes the pre hook stashed first.
pub fn run(ctx: &Context) -> Result<()> {
    ctx.restore_hook_stash()?;
    commit(ctx)
}

fn commit(ctx: &Context) -> Result<()> {
    if !can_commit(ctx)? {
        return Ok(());
    }

    let message = ctx.prompter.input(&ctx.question("title.commitMessage")?)?;
    let message = message.trim();
    if message.is_empty() {
        ui::display_status(&ctx.t("status.cancelled"));
        return Ok(());
    }

    ctx.git(&["add", "-A"])?;
    let output = ctx.git(&["commit", "-m", message])?;
    ui::display_output(&output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Flow, WorkflowConfig};
    use crate::context::with_test_context;
    use crate::git::{MockRepository, Repository};
    use crate::hooks::{HookExecutor, HookType};
    use crate::ui::{Answer, ScriptedPrompter};
    use std::path::PathBuf;

    fn config() -> WorkflowConfig {
        WorkflowConfig::for_flow(Flow::GitFlow, PathBuf::from("/repo"))
    }

    #[test]
    fn test_commit_adds_and_commits() {
        let repo = MockRepository::new().with_branch("feature/a").with_changes(true);
        let prompter = ScriptedPrompter::new([Answer::input("feat: add login")]);
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert_eq!(repo.calls(), vec!["add -A", "commit -m feat: add login"]);
        assert!(!repo.changes().unwrap());
    }

    #[test]
    fn test_commit_after_pre_hook_restores_stash() {
        let repo = MockRepository::new().with_branch("feature/a").with_changes(true);
        let prompter = ScriptedPrompter::new([Answer::input("fix: typo")]);
        with_test_context(&repo, &prompter, &config(), |ctx| {
            HookExecutor::run(HookType::Pre, ctx)?;
            run(ctx)
        })
        .unwrap();
        assert_eq!(
            repo.calls(),
            vec![
                "stash push -u",
                "fetch --all --prune",
                "stash pop",
                "add -A",
                "commit -m fix: typo"
            ]
        );
    }

    #[test]
    fn test_empty_message_cancels() {
        let repo = MockRepository::new().with_branch("feature/a").with_changes(true);
        let prompter = ScriptedPrompter::new([Answer::input("   ")]);
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_protected_branch_never_prompts() {
        let repo = MockRepository::new().with_branch("develop").with_changes(true);
        let prompter = ScriptedPrompter::default();
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert!(prompter.asked().is_empty());
        assert!(repo.calls().is_empty());
    }
}
