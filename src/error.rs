use thiserror::Error;

/// Unified error type for git-workflow operations
#[derive(Error, Debug)]
pub enum GitWorkflowError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The user declined a confirmation the workflow cannot continue without.
    #[error("Aborted by user")]
    Aborted,
}

/// Convenience type alias for Results in git-workflow
pub type Result<T> = std::result::Result<T, GitWorkflowError>;

impl GitWorkflowError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitWorkflowError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitWorkflowError::Version(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        GitWorkflowError::Command(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        GitWorkflowError::Prompt(msg.into())
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, GitWorkflowError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitWorkflowError::config("unknown action 'deploy'");
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown action 'deploy'"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitWorkflowError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitWorkflowError::config("x"), "Configuration error"),
            (GitWorkflowError::version("x"), "Version error"),
            (GitWorkflowError::command("x"), "Command failed"),
            (GitWorkflowError::prompt("x"), "Prompt failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_aborted_is_distinguishable() {
        assert!(GitWorkflowError::Aborted.is_aborted());
        assert!(!GitWorkflowError::command("git stash").is_aborted());
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("flow = ").unwrap_err();
        let err: GitWorkflowError = parse_err.into();
        assert!(err.to_string().starts_with("Invalid config file"));
    }
}
