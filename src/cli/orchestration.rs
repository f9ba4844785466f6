//! Startup sequence of the binary: logging, config, repository, session.

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::config::{load_config, WorkflowConfig};
use crate::context::Context;
use crate::git::{Git2Repository, Repository};
use crate::i18n::Messages;
use crate::session::{run_session, SessionEnd};
use crate::ui::{self, Prompter, TerminalPrompter};
use crate::version::ConventionalEngine;

/// Runs one interactive session for `args`.
///
/// Declining to initialise a missing repository ends the session like
/// `exit` does.
pub fn run(args: Args) -> Result<SessionEnd> {
    init_tracing(args.verbose);

    let user = load_config(args.config.as_deref()).context("Error loading config")?;
    let messages = Messages::default();
    let prompter = TerminalPrompter::new();

    let cwd = std::env::current_dir().context("Cannot read the working directory")?;
    let repo = match Git2Repository::try_open(&cwd)? {
        Some(repo) => repo,
        None => {
            if !prompter.confirm(&messages.t("title.gitInit"), false)? {
                return Ok(SessionEnd::Exit);
            }
            tracing::debug!(path = %cwd.display(), "initialising repository");
            Git2Repository::init(&cwd)?
        }
    };

    let root = repo.root()?;
    let (config, fallback) = WorkflowConfig::resolve(user, args.flow.as_deref(), root)
        .context("Invalid configuration")?;
    if let Some(fallback) = fallback {
        tracing::warn!(requested = %fallback.requested, used = %fallback.used, "unknown flow");
        ui::display_warning(&messages.t_with(
            "status.flowNotFound",
            &[
                ("current", fallback.requested.as_str()),
                ("def", fallback.used.key()),
            ],
        ));
    }

    let engine = ConventionalEngine::new(&repo);
    let ctx = Context::new(&repo, &prompter, &engine, &config, &messages);
    let end = run_session(&ctx)?;
    tracing::debug!(?end, "session ended");
    Ok(end)
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
