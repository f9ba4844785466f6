//! Handlers behind each menu action.

pub mod branch;
pub mod check;
pub mod commit;
pub mod helpers;
pub mod rebase;
pub mod release;
pub mod setup;
pub mod status;

use crate::context::Context;
use crate::domain::{Action, Selection};
use crate::error::Result;

/// Runs the handler for `selection`.
///
/// `helpers` and `exit` are resolved by the session before dispatch and do
/// nothing here.
pub fn run(ctx: &Context, selection: Selection) -> Result<()> {
    tracing::debug!(action = %selection.key(), "dispatching");
    match selection {
        Selection::Action(action) => match action {
            Action::Check => check::run(ctx),
            Action::Status => status::run(ctx),
            Action::Commit => commit::run(ctx),
            Action::Rebase => rebase::run(ctx),
            Action::Setup => setup::run(ctx),
            Action::SwitchBranch => branch::switch(ctx),
            Action::NewBranch => branch::create(ctx),
            Action::SyncBranch => branch::sync(ctx),
            Action::Release => release::run(ctx),
            Action::Helpers | Action::Exit => Ok(()),
        },
        Selection::Helper(helper) => helpers::run(ctx, helper),
    }
}
