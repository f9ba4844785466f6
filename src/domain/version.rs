use serde::Deserialize;
use std::fmt;

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// Overrides the version a release gets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseAs {
    /// Bump kind instead of the one derived from commits
    Bump(VersionBump),
    /// This exact version, already validated by the caller
    Exact(String),
}

/// Options handed to a version engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOptions {
    pub tag_prefix: String,
    /// Compute the next version without tagging
    pub dry_run: bool,
    /// Version to bump from, without the tag prefix. `None` means first release.
    pub current: Option<String>,
    pub release_as: Option<ReleaseAs>,
    /// Pre-release identifier such as "beta"
    pub prerelease: Option<String>,
}

impl BumpOptions {
    pub fn new(tag_prefix: impl Into<String>) -> Self {
        BumpOptions {
            tag_prefix: tag_prefix.into(),
            dry_run: false,
            current: None,
            release_as: None,
            prerelease: None,
        }
    }

    /// Copy of these options with `dry_run` set
    pub fn dry(&self) -> Self {
        BumpOptions {
            dry_run: true,
            ..self.clone()
        }
    }
}
