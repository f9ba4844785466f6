use crate::conflict::{check_conflict_string, confirm_resolved};
use crate::context::Context;
use crate::domain::base_on_branch;
use crate::error::Result;
use crate::ui;

/// Continues a rebase in progress, or rebases the current branch onto the
/// branch it is based on.
pub fn run(ctx: &Context) -> Result<()> {
    if ctx.repo.is_rebasing()? {
        return continue_rebase(ctx);
    }

    let branch = ctx.repo.current_branch()?;
    let base = base_on_branch(&branch, &ctx.config.branches);
    tracing::debug!(branch = %branch, base = %base, "rebasing");
    if let Err(e) = ctx.git(&["rebase", base]) {
        if !ctx.repo.is_rebasing()? {
            return Err(e);
        }
        tracing::debug!(error = %e, "rebase stopped");
    }
    continue_rebase(ctx)
}

/// Walks a stopped rebase to the end: the user resolves each stop, the
/// resolution is staged and the rebase continued, until git reports no
/// rebase in progress.
pub fn continue_rebase(ctx: &Context) -> Result<()> {
    while ctx.repo.is_rebasing()? {
        let branch = ctx.repo.current_branch()?;
        let conflicts = ctx.repo.conflicts()?;
        if !conflicts.is_empty() {
            ui::display_list(&ctx.t("title.conflictsFound"), &conflicts);
            confirm_resolved(ctx, &branch)?;
        }
        if ctx.config.check_conflict_string {
            check_conflict_string(ctx, &branch)?;
        }

        ctx.git(&["add", "-A"])?;
        if let Err(e) = ctx.git(&["-c", "core.editor=true", "rebase", "--continue"]) {
            if !ctx.repo.is_rebasing()? {
                return Err(e);
            }
            tracing::debug!(error = %e, "rebase stopped again");
        }
    }
    Ok(())
}
