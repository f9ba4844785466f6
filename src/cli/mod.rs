//! Command-line surface of the `git-workflow` binary.

pub mod orchestration;

pub use orchestration::run;

#[derive(Debug, Clone, PartialEq, Eq, clap::Parser)]
#[command(
    name = "git-workflow",
    version,
    about = "Interactive assistant enforcing a git branching workflow"
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, help = "Branching flow to use, overriding the config file")]
    pub flow: Option<String>,

    #[arg(short, long, help = "Log every git command and hook step")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["git-workflow", "--flow", "git-flow", "-v"]);
        assert_eq!(args.flow.as_deref(), Some("git-flow"));
        assert!(args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["git-workflow", "--force"]).is_err());
    }
}
