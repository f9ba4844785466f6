use crate::context::Context;
use crate::domain::Helper;
use crate::error::Result;
use crate::ui;

pub fn run(ctx: &Context, helper: Helper) -> Result<()> {
    match helper {
        Helper::CleanUp => clean_up(ctx),
        Helper::RmStaleBranches => rm_stale_branches(ctx),
    }
}

fn clean_up(ctx: &Context) -> Result<()> {
    ctx.echo(&["gc"]);
    ctx.repo.garbage_collect()
}

/// Deletes local branches whose upstream is gone, except the checked-out one.
fn rm_stale_branches(ctx: &Context) -> Result<()> {
    let current = ctx.repo.current_branch()?;
    let stale: Vec<String> = ctx
        .repo
        .stale_branches()?
        .into_iter()
        .filter(|b| *b != current)
        .collect();

    if stale.is_empty() {
        ui::display_status(&ctx.t("status.noStale"));
        return Ok(());
    }

    for branch in &stale {
        ctx.echo(&["branch", "-D", branch]);
        ctx.repo.delete_branch(branch)?;
    }
    ui::display_success(&ctx.t_with(
        "status.staleRemoved",
        &[("branches", stale.join(", ").as_str())],
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Flow, WorkflowConfig};
    use crate::context::with_test_context;
    use crate::git::{MockRepository, Repository};
    use crate::ui::ScriptedPrompter;
    use std::path::PathBuf;

    fn config() -> WorkflowConfig {
        WorkflowConfig::for_flow(Flow::GithubFlow, PathBuf::from("/repo"))
    }

    #[test]
    fn test_rm_stale_branches_spares_current() {
        let repo = MockRepository::new()
            .with_local_branches(&["master", "feature/old", "fix/gone"])
            .with_branch("fix/gone")
            .with_stale_branches(&["feature/old", "fix/gone"]);
        let prompter = ScriptedPrompter::default();
        with_test_context(&repo, &prompter, &config(), |ctx| {
            run(ctx, Helper::RmStaleBranches)
        })
        .unwrap();
        assert_eq!(repo.calls(), vec!["branch -D feature/old"]);
        assert_eq!(repo.local_branches().unwrap(), vec!["master", "fix/gone"]);
    }

    #[test]
    fn test_rm_stale_branches_none() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::default();
        with_test_context(&repo, &prompter, &config(), |ctx| {
            run(ctx, Helper::RmStaleBranches)
        })
        .unwrap();
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_clean_up_runs_gc() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::default();
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx, Helper::CleanUp)).unwrap();
        assert_eq!(repo.calls(), vec!["gc"]);
    }
}
