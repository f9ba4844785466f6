use crate::conflict::{check_status, StatusOutcome};
use crate::context::Context;
use crate::error::Result;
use crate::flows::commit;
use crate::ui;

/// Resolves pending conflicts, committing the resolution when one is due.
pub fn run(ctx: &Context) -> Result<()> {
    match check_status(ctx)? {
        StatusOutcome::Rebase => ui::display_status(&ctx.t("status.rebaseInProgress")),
        StatusOutcome::Commit => commit::run(ctx)?,
        StatusOutcome::Clean => {}
    }
    Ok(())
}
