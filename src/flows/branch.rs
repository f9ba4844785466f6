use console::style;

use crate::context::Context;
use crate::domain::{base_on_branch, compose_branch_name};
use crate::error::Result;
use crate::flows::rebase::continue_rebase;
use crate::ui;

/// Lets the user pick a local branch, the current one listed first.
///
/// `None` when every branch is ignored or there are none.
pub fn choose_branch(ctx: &Context, ignore: &[&str], action: &str) -> Result<Option<String>> {
    let current = ctx.repo.current_branch()?;
    let mut branches: Vec<String> = ctx
        .repo
        .local_branches()?
        .into_iter()
        .filter(|b| !ignore.contains(&b.as_str()))
        .collect();

    if branches.is_empty() {
        println!(
            "\n{}",
            style(ctx.t_with("status.noBranch", &[("action", action)])).red()
        );
        return Ok(None);
    }

    if let Some(index) = branches.iter().position(|b| *b == current) {
        let branch = branches.remove(index);
        branches.insert(0, branch);
    }
    let labels: Vec<String> = branches
        .iter()
        .map(|b| {
            if *b == current {
                format!("{} ({})", b, ctx.t("status.currentBranch"))
            } else {
                b.clone()
            }
        })
        .collect();

    let message = format!(
        "{} {}",
        ctx.prompt_prefix_for(&current),
        ctx.t_with("title.chooseBranch", &[("action", action)])
    );
    let index = ctx.prompter.select(&message, &labels)?;
    Ok(branches.into_iter().nth(index))
}

/// Checks out another local branch.
pub fn switch(ctx: &Context) -> Result<()> {
    let current = ctx.repo.current_branch()?;
    let action = ctx.t("actions.switch-branch");
    let Some(target) = choose_branch(ctx, &[], &action)? else {
        return Ok(());
    };
    if target == current {
        return Ok(());
    }
    ctx.git(&["checkout", &target])?;
    Ok(())
}

/// Creates `<prefix><infix><name>` from the base of the chosen branch type.
pub fn create(ctx: &Context) -> Result<()> {
    let branches = &ctx.config.branches;
    let kinds: Vec<String> = branches.short_lived.keys().cloned().collect();
    if kinds.is_empty() {
        ui::display_error(&ctx.t_with(
            "status.noBranchType",
            &[("flow", ctx.config.flow.key())],
        ));
        return Ok(());
    }

    let index = ctx
        .prompter
        .select(&ctx.question("title.chooseBranchType")?, &kinds)?;
    let Some(prefix) = kinds.get(index) else {
        return Ok(());
    };

    let question = format!(
        "{} {}",
        ctx.prompt_prefix()?,
        ctx.t_with(
            "title.branchName",
            &[("prefix", prefix.as_str()), ("infix", branches.infix.as_str())]
        )
    );
    let suffix = ctx.prompter.input(&question)?;
    let suffix = suffix.trim();
    if suffix.is_empty() {
        ui::display_status(&ctx.t("status.cancelled"));
        return Ok(());
    }

    let name = compose_branch_name(prefix, &branches.infix, suffix);
    if ctx.repo.local_branches()?.contains(&name) {
        ui::display_warning(&ctx.t_with("status.branchExists", &[("branch", name.as_str())]));
        return Ok(());
    }

    let base = base_on_branch(&name, branches);
    ctx.git(&["checkout", "-b", &name, base])?;
    ui::display_success(&ctx.t_with(
        "status.branchCreated",
        &[("branch", name.as_str()), ("base", base)],
    ));
    Ok(())
}

/// Pulls the current branch from `origin` with rebase, resolving any stops.
pub fn sync(ctx: &Context) -> Result<()> {
    let branch = ctx.repo.current_branch()?;
    if let Err(e) = ctx.git(&["pull", "--rebase", "origin", &branch]) {
        if !ctx.repo.is_rebasing()? {
            return Err(e);
        }
        tracing::debug!(error = %e, "pull stopped on conflicts");
    }
    continue_rebase(ctx)
}
