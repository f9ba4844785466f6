//! Next-version computation and the search for a tag not yet taken.

use semver::{BuildMetadata, Prerelease, Version};

use crate::context::Context;
use crate::conventional::determine_version_bump;
use crate::domain::{BumpOptions, ReleaseAs, Tag, VersionBump};
use crate::error::{GitWorkflowError, Result};
use crate::git::Repository;
use crate::ui;

/// Version used when there is no current version to bump from
pub const FIRST_RELEASE: &str = "0.1.0";

/// Computes the next version from [BumpOptions]. Tags the release unless
/// `dry_run` is set.
pub trait VersionEngine {
    fn bump(&self, opts: &BumpOptions) -> Result<String>;
}

/// Semver engine deriving the bump kind from conventional commits.
pub struct ConventionalEngine<'a> {
    repo: &'a dyn Repository,
}

impl<'a> ConventionalEngine<'a> {
    pub fn new(repo: &'a dyn Repository) -> Self {
        ConventionalEngine { repo }
    }

    /// Commits since the tag of `current`, or since the latest tag when
    /// `current` was never tagged
    fn bump_kind(&self, opts: &BumpOptions, current: &Version) -> Result<VersionBump> {
        let own_tag = Tag::from_version(&opts.tag_prefix, &current.to_string());
        let since = if own_tag.exists_in(&self.repo.tags()?) {
            Some(own_tag.name)
        } else {
            self.repo.latest_tag()?
        };
        let messages = self.repo.commit_messages_since(since.as_deref())?;
        Ok(determine_version_bump(&messages))
    }
}

impl VersionEngine for ConventionalEngine<'_> {
    fn bump(&self, opts: &BumpOptions) -> Result<String> {
        let current = opts
            .current
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let next = match (&opts.release_as, current) {
            (Some(ReleaseAs::Exact(version)), _) => parse(version)?,
            (_, None) => with_prerelease(parse(FIRST_RELEASE)?, opts.prerelease.as_deref(), None)?,
            (release_as, Some(current)) => {
                let current = parse(current)?;
                let kind = match release_as {
                    Some(ReleaseAs::Bump(kind)) => *kind,
                    _ => self.bump_kind(opts, &current)?,
                };
                next_version(&current, kind, opts.prerelease.as_deref())?
            }
        };

        let version = next.to_string();
        if !opts.dry_run {
            let tag = Tag::from_version(&opts.tag_prefix, &version);
            tracing::debug!(tag = %tag, "tagging release");
            self.repo.create_tag(&tag.name)?;
        }
        Ok(version)
    }
}

fn parse(version: &str) -> Result<Version> {
    Version::parse(version.trim_start_matches(['v', 'V']))
        .map_err(|e| GitWorkflowError::version(format!("'{}' is not a semantic version: {}", version, e)))
}

/// Applies `kind` (or advances an existing pre-release of the same identifier).
///
/// Without a pre-release identifier, a current pre-release is promoted to its
/// release version rather than bumped.
pub fn next_version(current: &Version, kind: VersionBump, prerelease: Option<&str>) -> Result<Version> {
    if let Some(id) = prerelease {
        let iteration = current
            .pre
            .as_str()
            .strip_prefix(id)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|n| n.parse::<u64>().ok());
        if let Some(n) = iteration {
            let mut next = current.clone();
            next.build = BuildMetadata::EMPTY;
            return with_prerelease(next, Some(id), Some(n + 1));
        }
    }

    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;
    if current.pre.is_empty() {
        match kind {
            VersionBump::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
            }
            VersionBump::Minor => {
                next.minor += 1;
                next.patch = 0;
            }
            VersionBump::Patch => next.patch += 1,
        }
    }
    with_prerelease(next, prerelease, None)
}

fn with_prerelease(mut version: Version, id: Option<&str>, iteration: Option<u64>) -> Result<Version> {
    version.pre = match id {
        Some(id) => Prerelease::new(&format!("{}.{}", id, iteration.unwrap_or(0)))
            .map_err(|e| GitWorkflowError::version(format!("invalid pre-release '{}': {}", id, e)))?,
        None => Prerelease::EMPTY,
    };
    Ok(version)
}

/// Runs the version engine from `version`, or from the latest tag with the
/// prefix stripped.
///
/// Engine failures are reported and yield `None`; they never propagate.
pub fn bump_version(ctx: &Context, opts: &BumpOptions, version: Option<&str>) -> Option<String> {
    match run_engine(ctx, opts, version) {
        Ok(next) => {
            tracing::debug!(version = %next, dry_run = opts.dry_run, "version computed");
            Some(next)
        }
        Err(e) => {
            tracing::warn!(error = %e, "version engine failed");
            ui::display_error(&ctx.t_with(
                "status.versionFailed",
                &[("message", e.to_string().as_str())],
            ));
            None
        }
    }
}

fn run_engine(ctx: &Context, opts: &BumpOptions, version: Option<&str>) -> Result<String> {
    let current = match version {
        Some(v) => Some(v.to_string()),
        None => ctx
            .repo
            .latest_tag()?
            .map(|tag| Tag::new(tag).version_part(&opts.tag_prefix).to_string()),
    };
    let opts = BumpOptions {
        current,
        ..opts.clone()
    };
    ctx.engine.bump(&opts)
}

/// Dry-runs the engine until its candidate's tag is free.
///
/// When the candidate's tag exists the user is asked for another version to
/// bump from; empty input (or an engine failure) gives `None`. Never tags.
pub fn next_valid_version(
    ctx: &Context,
    opts: &BumpOptions,
    version: Option<&str>,
) -> Result<Option<String>> {
    let dry = opts.dry();
    let mut seed = version.map(str::to_string);

    loop {
        let Some(candidate) = bump_version(ctx, &dry, seed.as_deref()) else {
            return Ok(None);
        };

        let tag = Tag::from_version(&opts.tag_prefix, &candidate);
        if !tag.exists_in(&ctx.repo.tags()?) {
            return Ok(Some(candidate));
        }

        let answer = ctx
            .prompter
            .input(&ctx.t_with("title.tagExists", &[("tag", tag.name.as_str())]))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        seed = Some(answer.to_string());
    }
}
