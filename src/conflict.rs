//! Conflict detection and the resolve-then-confirm loops.
//!
//! Declining a "conflicts resolved?" question yields
//! [GitWorkflowError::Aborted]; the session ends on it.

use crate::context::Context;
use crate::error::{GitWorkflowError, Result};
use crate::ui;

/// What the caller should do after [check_status]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// A rebase is in progress; the rebase flow owns it
    Rebase,
    /// Merge conflicts were resolved; a commit is expected next
    Commit,
    /// Nothing to resolve
    Clean,
}

/// Single read of repository state, resolving conflicts interactively.
pub fn check_status(ctx: &Context) -> Result<StatusOutcome> {
    if ctx.repo.is_rebasing()? {
        return Ok(StatusOutcome::Rebase);
    }

    let branch = ctx.repo.current_branch()?;
    let conflicts = ctx.repo.conflicts()?;

    if !conflicts.is_empty() {
        tracing::debug!(count = conflicts.len(), "merge conflicts");
        ui::display_list(&ctx.t("title.conflictsFound"), &conflicts);
        confirm_resolved(ctx, &branch)?;
        if ctx.config.check_conflict_string {
            check_conflict_string(ctx, &branch)?;
        }
        return Ok(StatusOutcome::Commit);
    }

    if ctx.config.check_conflict_string {
        check_conflict_string(ctx, &branch)?;
    }
    Ok(StatusOutcome::Clean)
}

/// Re-scans for conflict markers until none remain or the user gives up.
pub fn check_conflict_string(ctx: &Context, branch: &str) -> Result<()> {
    loop {
        let markers = ctx.repo.conflicts_string()?;
        if markers.is_empty() {
            return Ok(());
        }

        tracing::debug!(count = markers.len(), "conflict markers");
        ui::display_list(&ctx.t("title.conflictStringsFound"), &markers);
        confirm_resolved(ctx, branch)?;
    }
}

/// Asks whether conflicts are resolved; `Aborted` when they are not.
pub fn confirm_resolved(ctx: &Context, branch: &str) -> Result<()> {
    println!();
    let message = format!(
        "{} {}",
        ctx.prompt_prefix_for(branch),
        ctx.t("title.conflictsResolved")
    );
    if ctx.prompter.confirm(&message, true)? {
        Ok(())
    } else {
        Err(GitWorkflowError::Aborted)
    }
}
