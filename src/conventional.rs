use crate::domain::VersionBump;
use regex::Regex;

const BREAKING_CHANGE_INDICATORS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

#[derive(Debug, PartialEq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

/// Parses `type(scope)!: description` headers. Non-conventional messages
/// come back as `chore` with the full message as description.
pub fn parse_conventional_commit(message: &str) -> ParsedCommit {
    let header = message.lines().next().unwrap_or("");
    let body_breaking = BREAKING_CHANGE_INDICATORS
        .iter()
        .any(|indicator| message.contains(indicator));

    if let Ok(re) = Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)$") {
        if let Some(captures) = re.captures(header) {
            let commit_type = captures.get(1).map(|m| m.as_str()).unwrap_or("chore");
            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let exclamation_marker = captures.get(3).map(|m| m.as_str()).unwrap_or("");
            let description = captures.get(4).map(|m| m.as_str()).unwrap_or("");

            return ParsedCommit {
                r#type: commit_type.to_string(),
                scope,
                description: description.to_string(),
                is_breaking_change: exclamation_marker == "!" || body_breaking,
            };
        }
    }

    ParsedCommit {
        r#type: "chore".to_string(),
        scope: None,
        description: message.to_string(),
        is_breaking_change: body_breaking,
    }
}

/// Bump implied by a set of commit messages.
///
/// Any breaking change wins, then any `feat`; everything else is a patch.
pub fn determine_version_bump(commit_messages: &[String]) -> VersionBump {
    let mut has_features = false;

    for message in commit_messages {
        let parsed = parse_conventional_commit(message);

        if parsed.is_breaking_change {
            return VersionBump::Major;
        }

        if matches!(parsed.r#type.as_str(), "feat" | "feature") {
            has_features = true;
        }
    }

    if has_features {
        VersionBump::Minor
    } else {
        VersionBump::Patch
    }
}
