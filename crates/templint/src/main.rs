//! templint command-line entry point

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use templint::checks::yaml_parser_available;
use templint::cli::{Cli, Commands, ConfigCommands, HooksCommands};
use templint::commit::{parse_commit_message, read_commit_message, usage_guide};
use templint::config::{ConfigError, ValidatorConfig};
use templint::document::Flavor;
use templint::errors::ActionableError;
use templint::output::{render_report, ExitCode, JsonError, JsonOutput, OutputContext, ValidateResponse};
use templint::validator::{select_documents, Validator};
use templint::{hooks, logging, BashSyntaxChecker};

/// Determine the exit code from an operational error
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    for cause in error.chain() {
        if cause.downcast_ref::<ConfigError>().is_some() {
            return ExitCode::InvalidArgument;
        }
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return match io_error.kind() {
                std::io::ErrorKind::NotFound => ExitCode::NotFound,
                _ => ExitCode::ExternalError,
            };
        }
        if let Some(actionable) = cause.downcast_ref::<ActionableError>() {
            let message = actionable.message().to_lowercase();
            return if message.contains("not configured") {
                ExitCode::InvalidArgument
            } else if message.contains("not found") || message.contains("not in a git repository") {
                ExitCode::NotFound
            } else {
                ExitCode::Failure
            };
        }
    }

    let error_msg = error.to_string().to_lowercase();
    if error_msg.contains("failed to parse") || error_msg.contains("invalid") {
        ExitCode::InvalidArgument
    } else {
        ExitCode::Failure
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Validate { .. } => "validate",
        Commands::CheckCommit { .. } => "check-commit",
        Commands::Hooks(HooksCommands::Install { .. }) => "hooks install",
        Commands::Config(ConfigCommands::Show { .. }) => "config show",
    }
}

fn wants_json(command: &Commands) -> bool {
    match command {
        Commands::Validate { json, .. } => *json,
        Commands::CheckCommit { .. } => false,
        Commands::Hooks(HooksCommands::Install { json, .. }) => *json,
        Commands::Config(ConfigCommands::Show { json }) => *json,
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let json = wants_json(&cli.command);
    let command = command_name(&cli.command);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let code = error_to_exit_code(&e);
            if json {
                let error = JsonError::from_error(code.error_code(), &e, command);
                if let Ok(rendered) = error.to_json_string() {
                    println!("{}", rendered);
                }
            }
            eprintln!("Error: {:#}", e);
            code
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

/// Directory relative config paths resolve against
fn config_base_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

fn run(cli: Cli) -> Result<ExitCode> {
    let quiet = cli.quiet;

    match cli.command {
        Commands::Validate {
            documents,
            flavor,
            template_root,
            json,
        } => run_validate(
            &cli.config,
            &documents,
            flavor,
            template_root.as_deref(),
            OutputContext::new(quiet, json),
        ),
        Commands::CheckCommit { file } => run_check_commit(file.as_deref()),
        Commands::Hooks(HooksCommands::Install { git_dir, json }) => {
            let output_ctx = OutputContext::new(quiet, json);
            let result = hooks::install_hooks(git_dir)?;

            output_ctx.print_json(&JsonOutput::success(&result, "hooks install"))?;
            output_ctx.print_info(format!("Hooks directory: {}", result.hooks_dir))?;
            for hook in &result.installed {
                output_ctx.print_data(format!("✓ Installed {}", hook))?;
            }
            for hook in &result.skipped {
                output_ctx.print_warning(format!("Skipped {}", hook))?;
            }
            Ok(ExitCode::Success)
        }
        Commands::Config(ConfigCommands::Show { json }) => {
            let output_ctx = OutputContext::new(quiet, json);
            let config = ValidatorConfig::load(&cli.config)?;

            output_ctx.print_json(&JsonOutput::success(&config, "config show"))?;
            output_ctx.print_data(config.to_toml_string()?.trim_end())?;
            Ok(ExitCode::Success)
        }
    }
}

fn run_validate(
    config_path: &Path,
    documents: &[PathBuf],
    flavor: Option<Flavor>,
    template_root: Option<&Path>,
    output_ctx: OutputContext,
) -> Result<ExitCode> {
    let config = ValidatorConfig::load(config_path)?.resolve_paths(&config_base_dir(config_path));
    let checker = BashSyntaxChecker::locate(&config.shell.program);

    if !yaml_parser_available() {
        output_ctx.print_warning("built without YAML support; yaml-syntax checks are skipped")?;
    }

    let validator = Validator::new(config, checker);
    let report = if documents.is_empty() {
        validator.validate_all()
    } else {
        let selected = select_documents(validator.config(), documents, flavor, template_root)?;
        let selected: Vec<_> = selected.iter().collect();
        validator.validate_selected(&selected)
    };

    output_ctx.print_json(&JsonOutput::new(
        report.passed(),
        ValidateResponse::new(&report),
        "validate",
    ))?;
    output_ctx.print_data(render_report(&report, !output_ctx.is_quiet()))?;

    Ok(if report.passed() {
        ExitCode::Success
    } else {
        ExitCode::Failure
    })
}

fn run_check_commit(file: Option<&Path>) -> Result<ExitCode> {
    let Some(file) = file else {
        eprintln!("ERROR: No commit message file provided");
        return Ok(ExitCode::Failure);
    };

    let message = read_commit_message(file)?;
    match parse_commit_message(&message) {
        Ok(commit) => {
            tracing::debug!(kind = %commit.kind, scope = ?commit.scope, "commit message accepted");
            Ok(ExitCode::Success)
        }
        Err(err) => {
            tracing::debug!(%err, "commit message rejected");
            eprint!("{}", usage_guide());
            Ok(ExitCode::Failure)
        }
    }
}
