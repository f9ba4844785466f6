/// A version tag: the configured prefix followed by a version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Tag for `version` under `prefix` (e.g., "v" + "1.2.3" -> "v1.2.3")
    pub fn from_version(prefix: &str, version: &str) -> Self {
        Tag {
            name: format!("{}{}", prefix, version),
        }
    }

    /// Version part of the tag. Names not carrying `prefix` are returned whole.
    pub fn version_part(&self, prefix: &str) -> &str {
        self.name.strip_prefix(prefix).unwrap_or(&self.name)
    }

    /// Whether a tag with this exact name is among `existing`
    pub fn exists_in(&self, existing: &[String]) -> bool {
        existing.iter().any(|tag| tag == &self.name)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
