use crate::context::Context;
use crate::error::Result;
use crate::ui;

/// Prints the short status of the working tree as the user left it.
pub fn run(ctx: &Context) -> Result<()> {
    ctx.restore_hook_stash()?;
    let output = ctx.repo.exec(&["status", "-sb"])?;
    ui::display_output(&output);
    Ok(())
}
