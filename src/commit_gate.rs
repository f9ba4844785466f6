use console::style;

use crate::context::Context;
use crate::error::Result;
use crate::ui;

/// Whether a commit is permitted right now. Prints the reason when it is not.
pub fn can_commit(ctx: &Context) -> Result<bool> {
    if !ctx.repo.changes()? {
        ui::display_status(&ctx.t("status.noCommit"));
        return Ok(false);
    }

    let branch = ctx.repo.current_branch()?;
    if ctx.config.branches.is_protected(&branch) {
        tracing::debug!(branch = %branch, "commit refused on protected branch");
        println!("{}", style(ctx.t("status.protected")).yellow());
        return Ok(false);
    }

    Ok(true)
}
