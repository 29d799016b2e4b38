//! Command-line interface definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::document::Flavor;
use crate::output::ExitCode;

/// Template repository linter
///
/// Checks CUSTOMIZATION.md guides against the templates they describe, and
/// commit messages against the conventional commit format.
#[derive(Parser)]
#[command(name = "templint", version)]
#[command(about = "Template repository linter", long_about = None)]
#[command(after_help = ExitCode::all_codes_documentation())]
pub struct Cli {
    /// Suppress non-essential output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to the config file
    #[arg(long, global = true, env = "TEMPLINT_CONFIG", default_value = crate::config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate customization guides
    ///
    /// Without arguments, every document listed in templint.toml is checked
    /// and configured pairs are compared. Given paths select a subset; a path
    /// that is not configured needs --flavor.
    ///
    /// Examples:
    ///   templint validate
    ///   templint validate templates/shell-project/CUSTOMIZATION.md
    ///   templint validate docs/GUIDE.md --flavor python --template-root .
    Validate {
        /// Documents to validate (default: all configured)
        documents: Vec<PathBuf>,

        /// Flavor for documents not listed in the config
        #[arg(long, value_enum)]
        flavor: Option<Flavor>,

        /// Template root for documents not listed in the config
        #[arg(long, requires = "flavor")]
        template_root: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a commit message file against the conventional commit format
    ///
    /// Intended for use from a commit-msg hook. Exits 0 silently when the
    /// message is accepted and 1 with a usage guide when it is not.
    CheckCommit {
        /// File holding the pending commit message
        file: Option<PathBuf>,
    },

    /// Git hook management
    #[command(subcommand)]
    Hooks(HooksCommands),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum HooksCommands {
    /// Install the commit-msg hook
    ///
    /// Existing hooks are left untouched.
    ///
    /// Examples:
    ///   templint hooks install
    ///   templint hooks install --git-dir ../repo/.git
    Install {
        /// Git directory (default: found by walking up from the current directory)
        #[arg(long)]
        git_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_lists_exit_codes() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Exit Codes:"));
        assert!(help.contains("3  - Resource not found"));
        assert!(help.contains("10 - External dependency failed"));
    }

    #[test]
    fn test_parse_validate_with_flavor() {
        let cli = Cli::try_parse_from([
            "templint",
            "validate",
            "docs/GUIDE.md",
            "--flavor",
            "shell",
            "--template-root",
            "docs",
        ])
        .unwrap();

        match cli.command {
            Commands::Validate {
                documents,
                flavor,
                template_root,
                json,
            } => {
                assert_eq!(documents, vec![PathBuf::from("docs/GUIDE.md")]);
                assert_eq!(flavor, Some(Flavor::Shell));
                assert_eq!(template_root, Some(PathBuf::from("docs")));
                assert!(!json);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_template_root_requires_flavor() {
        assert!(Cli::try_parse_from(["templint", "validate", "--template-root", "x"]).is_err());
    }

    #[test]
    fn test_check_commit_file_is_optional() {
        let cli = Cli::try_parse_from(["templint", "check-commit"]).unwrap();
        assert!(matches!(cli.command, Commands::CheckCommit { file: None }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["templint", "config", "show", "-vv", "--quiet"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }
}
