use crate::context::Context;
use crate::error::Result;
use crate::ui;

/// Creates every long-lived branch of the flow that is missing locally,
/// starting from `branches.main`.
pub fn run(ctx: &Context) -> Result<()> {
    let main = ctx.config.branches.main.as_str();
    let existing = ctx.repo.local_branches()?;
    let mut created = 0;

    for branch in ctx.config.branches.long_lived.values() {
        if branch.name == main || existing.contains(&branch.name) {
            continue;
        }
        ctx.git(&["branch", &branch.name, main])?;
        ui::display_success(&ctx.t_with(
            "status.branchCreated",
            &[("branch", branch.name.as_str()), ("base", main)],
        ));
        created += 1;
    }

    if created == 0 {
        ui::display_status(&ctx.t("status.setupDone"));
    }
    Ok(())
}
