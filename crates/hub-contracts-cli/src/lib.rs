// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod helpers;

use clap::{error::ErrorKind, ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use hub_contracts_core::{ErrorCode, ExitCode, MachineError};
use hub_contracts_model::{FilterSelection, FilterableColumn};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const CRATE_NAME: &str = "hub-contracts-cli";

const HUB_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "hub-contracts", version)]
#[command(about = "Contract intelligence dashboard over a contract CSV export")]
#[command(help_template = HUB_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  HUB_CONTRACTS_SOURCE   Contract dataset path\n  HUB_LOG_LEVEL          Log filter override (falls back to RUST_LOG)\n  HUB_LOG_JSON           Emit log lines as JSON"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true)]
    source: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline metrics and every view for the selected contracts.
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// One view of the catalog.
    View {
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Distinct values available to each filter.
    Options,
    /// Write the filtered, augmented table as CSV.
    Export {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "contract_id")]
        sort_column: String,
        #[arg(long, default_value_t = false)]
        descending: bool,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List the view catalog.
    Views,
    /// Print the resolved configuration.
    Config,
    /// Shell completion script on stdout.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Repeatable filter flags; an omitted flag leaves its column unrestricted.
#[derive(Args, Debug, Default, Clone)]
struct FilterArgs {
    #[arg(long = "project")]
    projects: Vec<String>,
    #[arg(long = "status")]
    statuses: Vec<String>,
    #[arg(long = "supplier")]
    suppliers: Vec<String>,
    #[arg(long = "contract-type")]
    contract_types: Vec<String>,
    #[arg(long = "risk-level")]
    risk_levels: Vec<String>,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::unrestricted();
        for (column, values) in [
            (FilterableColumn::Project, &self.projects),
            (FilterableColumn::Status, &self.statuses),
            (FilterableColumn::Supplier, &self.suppliers),
            (FilterableColumn::ContractType, &self.contract_types),
            (FilterableColumn::RiskLevel, &self.risk_levels),
        ] {
            if !values.is_empty() {
                selection.restrict(column, values.iter().cloned());
            }
        }
        selection
    }
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

pub(crate) struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    pub(crate) fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            exit_code: code.exit_code(),
            machine: MachineError::new(code, message),
        }
    }

    pub(crate) fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.machine = self.machine.with_detail(key, value);
        self
    }

    pub(crate) fn internal(message: String) -> Self {
        Self::new(ErrorCode::InternalError, &message)
    }
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(
                    CliError::new(ErrorCode::UsageError, "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                );
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });

    let command = cli
        .command
        .ok_or_else(|| CliError::new(ErrorCode::UsageError, "missing command; see --help"))?;
    let source = cli.source;

    match command {
        Commands::Dashboard { filters } => {
            commands::dashboard(source.as_deref(), &filters.selection(), output_mode)
        }
        Commands::View { name, filters } => {
            commands::single_view(source.as_deref(), &name, &filters.selection(), output_mode)
        }
        Commands::Options => commands::options(source.as_deref(), output_mode),
        Commands::Export {
            out,
            sort_column,
            descending,
            filters,
        } => commands::export(
            source.as_deref(),
            commands::ExportArgs {
                out,
                sort_column,
                descending,
                selection: filters.selection(),
            },
            output_mode,
        ),
        Commands::Views => commands::views(output_mode),
        Commands::Config => commands::config(source.as_deref(), output_mode),
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

fn log_filter(flags: LogFlags) -> String {
    if flags.quiet {
        return "error".to_string();
    }
    match flags.verbose {
        0 => hub_contracts_core::resolve_log_filter(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_tracing(flags: LogFlags) {
    let filter = EnvFilter::try_new(log_filter(flags))
        .unwrap_or_else(|_| EnvFilter::new(hub_contracts_core::DEFAULT_LOG_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    // A second init in the same process keeps the first subscriber.
    let _ = if hub_contracts_core::log_json_enabled() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match hub_contracts_core::canonical::stable_json_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"details\":{{}},\"message\":\"failed to encode structured error\"}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine);
        for (key, value) in &error.machine.details {
            eprintln!("  {key}: {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{log_filter, Cli, FilterArgs, LogFlags};
    use clap::CommandFactory;
    use hub_contracts_model::FilterableColumn;

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_a_help_line() {
        for sub in Cli::command().get_subcommands() {
            assert!(sub.get_about().is_some(), "{} lacks a doc line", sub.get_name());
        }
    }

    #[test]
    fn omitted_filter_flags_leave_columns_unrestricted() {
        let args = FilterArgs {
            projects: vec!["Alpha".to_string(), "Beta".to_string()],
            ..FilterArgs::default()
        };
        let selection = args.selection();
        assert_eq!(
            selection.restricted_columns().collect::<Vec<_>>(),
            vec![FilterableColumn::Project]
        );
        assert_eq!(
            selection
                .allowed(FilterableColumn::Project)
                .map(|s| s.len()),
            Some(2)
        );
    }

    #[test]
    fn quiet_and_verbose_override_the_env_filter() {
        assert_eq!(
            log_filter(LogFlags {
                quiet: true,
                verbose: 3
            }),
            "error"
        );
        assert_eq!(
            log_filter(LogFlags {
                quiet: false,
                verbose: 2
            }),
            "debug"
        );
    }
}
