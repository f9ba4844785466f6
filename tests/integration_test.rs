// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_git_workflow_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "git-workflow", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-workflow"));
    assert!(stdout.contains("--flow"));
}

#[test]
fn test_git_workflow_version() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "git-workflow", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_bump_detection() {
    use git_workflow::conventional::determine_version_bump;
    use git_workflow::domain::VersionBump;

    let commit_messages = vec![
        "feat: add new authentication system".to_string(),
        "fix: resolve login issue".to_string(),
    ];
    assert_eq!(determine_version_bump(&commit_messages), VersionBump::Minor);

    let breaking = vec!["refactor(api)!: drop v1 endpoints".to_string()];
    assert_eq!(determine_version_bump(&breaking), VersionBump::Major);
}
