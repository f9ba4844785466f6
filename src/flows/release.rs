use crate::context::Context;
use crate::domain::{BumpOptions, ReleaseAs, Tag};
use crate::error::Result;
use crate::ui;
use crate::version::{bump_version, next_valid_version};

/// Tags the next free version and offers to push the tag.
pub fn run(ctx: &Context) -> Result<()> {
    let mut opts = BumpOptions::new(ctx.config.tag_prefix.as_str());
    opts.prerelease = ctx.config.release.prerelease.clone();
    opts.release_as = ctx.config.release.release_as.map(ReleaseAs::Bump);
    let Some(version) = next_valid_version(ctx, &opts, None)? else {
        ui::display_status(&ctx.t("status.noVersion"));
        return Ok(());
    };

    let tag = Tag::from_version(&opts.tag_prefix, &version);
    let question = format!(
        "{} {}",
        ctx.prompt_prefix()?,
        ctx.t_with("title.confirmRelease", &[("tag", tag.name.as_str())])
    );
    if !ctx.prompter.confirm(&question, true)? {
        ui::display_status(&ctx.t("status.cancelled"));
        return Ok(());
    }

    let release = BumpOptions {
        release_as: Some(ReleaseAs::Exact(version)),
        ..opts
    };
    let Some(released) = bump_version(ctx, &release, None) else {
        return Ok(());
    };
    let tag = Tag::from_version(&release.tag_prefix, &released);
    ui::display_success(&ctx.t_with("status.released", &[("tag", tag.name.as_str())]));

    let question = format!(
        "{} {}",
        ctx.prompt_prefix()?,
        ctx.t_with("title.pushTag", &[("tag", tag.name.as_str())])
    );
    if ctx.prompter.confirm(&question, true)? {
        ctx.git(&["push", "origin", &tag.name])?;
    } else {
        ui::display_status(&ctx.t_with("status.pushLater", &[("tag", tag.name.as_str())]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Flow, ReleaseConfig, WorkflowConfig};
    use crate::domain::VersionBump;
    use crate::context::with_test_context;
    use crate::git::{MockRepository, Repository};
    use crate::ui::{Answer, ScriptedPrompter};
    use std::path::PathBuf;

    fn config() -> WorkflowConfig {
        WorkflowConfig::for_flow(Flow::GithubFlow, PathBuf::from("/repo"))
    }

    #[test]
    fn test_release_tags_and_pushes() {
        let repo = MockRepository::new()
            .with_tag("v0.3.1")
            .with_commit_messages(&["feat: webhooks"]);
        let prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Confirm(true)]);
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert_eq!(repo.calls(), vec!["tag v0.4.0", "push origin v0.4.0"]);
    }

    #[test]
    fn test_release_without_push() {
        let repo = MockRepository::new();
        let prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Confirm(false)]);
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert_eq!(repo.calls(), vec!["tag v0.1.0"]);
        assert!(repo.tags().unwrap().contains(&"v0.1.0".to_string()));
    }

    #[test]
    fn test_release_with_configured_prerelease() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_commit_messages(&["fix: flaky retry"]);
        let prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Confirm(false)]);
        let mut config = config();
        config.release = ReleaseConfig {
            prerelease: Some("rc".to_string()),
            release_as: None,
        };
        with_test_context(&repo, &prompter, &config, |ctx| run(ctx)).unwrap();
        assert_eq!(repo.calls(), vec!["tag v1.2.1-rc.0"]);
    }

    #[test]
    fn test_release_as_overrides_commit_kind() {
        let repo = MockRepository::new()
            .with_tag("v1.2.0")
            .with_commit_messages(&["fix: flaky retry"]);
        let prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Confirm(false)]);
        let mut config = config();
        config.release.release_as = Some(VersionBump::Major);
        with_test_context(&repo, &prompter, &config, |ctx| run(ctx)).unwrap();
        assert_eq!(repo.calls(), vec!["tag v2.0.0"]);
    }

    #[test]
    fn test_declined_release_creates_no_tag() {
        let repo = MockRepository::new().with_tag("v1.0.0");
        let prompter = ScriptedPrompter::new([Answer::Confirm(false)]);
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert!(repo.calls().is_empty());
    }

    #[test]
    fn test_abandoned_version_search_cancels() {
        let repo = MockRepository::new()
            .with_tag("v1.0.1")
            .with_tag("v1.0.0")
            .with_commit_messages(&["fix: leak"]);
        let prompter = ScriptedPrompter::new([Answer::input("")]);
        with_test_context(&repo, &prompter, &config(), |ctx| run(ctx)).unwrap();
        assert!(repo.calls().is_empty());
        assert_eq!(prompter.remaining(), 0);
    }
}
