mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{contacts, dedupe, jobs, normalize, owners, templates, Context};
use crate::error::{exit_code_for, report_error};
use sendlist_config as config;
use sendlist_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(
    name = "sendlist",
    version,
    about = "Normalize and deduplicate campaign recipients"
)]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show how raw numbers normalize
    Normalize(normalize::NormalizeArgs),
    /// Build a deduplicated send list
    Dedupe(dedupe::DedupeArgs),
    #[command(subcommand)]
    Contact(contacts::ContactCommand),
    #[command(subcommand)]
    Template(templates::TemplateCommand),
    #[command(subcommand)]
    Owner(owners::OwnerCommand),
    #[command(subcommand)]
    Jobs(jobs::JobsCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::Normalize(args) => normalize::normalize(&ctx, args),
        Command::Dedupe(args) => dedupe::dedupe(&ctx, args),
        Command::Contact(cmd) => match cmd {
            contacts::ContactCommand::Add(args) => contacts::add_contact(&ctx, args),
            contacts::ContactCommand::Ls(args) => contacts::list_contacts(&ctx, args),
            contacts::ContactCommand::Rm(args) => contacts::remove_contact(&ctx, args),
        },
        Command::Template(cmd) => match cmd {
            templates::TemplateCommand::Add(args) => templates::add_template(&ctx, args),
            templates::TemplateCommand::Ls(args) => templates::list_templates(&ctx, args),
            templates::TemplateCommand::Show(args) => templates::show_template(&ctx, args),
            templates::TemplateCommand::Activate(args) => {
                templates::set_template_active(&ctx, args, true)
            }
            templates::TemplateCommand::Deactivate(args) => {
                templates::set_template_active(&ctx, args, false)
            }
        },
        Command::Owner(cmd) => match cmd {
            owners::OwnerCommand::SetCountryCode(args) => owners::set_country_code(&ctx, args),
            owners::OwnerCommand::ClearCountryCode(args) => owners::clear_country_code(&ctx, args),
            owners::OwnerCommand::Show(args) => owners::show_owner(&ctx, args),
        },
        Command::Jobs(cmd) => match cmd {
            jobs::JobsCommand::Ls(args) => jobs::list_jobs(&ctx, args),
            jobs::JobsCommand::Show(args) => jobs::show_job(&ctx, args),
        },
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
