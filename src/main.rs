use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use habitual::auth::ConfigIdentity;
use habitual::cli::args::{Cli, Commands};
use habitual::cli::commands;
use habitual::config::Config;
use habitual::error::HabitError;
use habitual::service::HabitService;
use habitual::storage::SqliteHabitStore;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{}: {e:#}", "warning".yellow().bold());
    }

    if let Err(e) = run(cli) {
        if e.is_warning() {
            eprintln!("{}: {}", "warning".yellow().bold(), e);
        } else {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default = if verbose { "habitual=debug" } else { "habitual=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")
}

fn run(cli: Cli) -> Result<(), HabitError> {
    let mut config = Config::load()?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Auth(args) => commands::auth(args.command, &mut config, Config::save, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
        command => {
            let store = SqliteHabitStore::open()?;
            let service = HabitService::new(store, ConfigIdentity::new(&config.identity));
            let defaults = &config.habits;

            match command {
                Commands::Add(args) => commands::add(&service, args, defaults, format)?,
                Commands::Edit(args) => commands::edit(&service, &args, format)?,
                Commands::List(args) => commands::list(&service, args, defaults, format)?,
                Commands::Show { id } => commands::show(&service, &id, format)?,
                Commands::Complete { id, date } => {
                    commands::complete(&service, &id, date.as_deref(), format)?
                },
                Commands::Archive { id } => commands::archive(&service, &id, true, format)?,
                Commands::Unarchive { id } => commands::archive(&service, &id, false, format)?,
                Commands::Delete { id, yes } => commands::delete(&service, &id, yes, format)?,
                Commands::Stats => commands::stats(&service, format)?,
                Commands::Progress { category } => commands::progress(&service, category, format)?,
                Commands::Categories => commands::categories(&service, format)?,
                Commands::Dashboard => {
                    habitual::tui::run(&service)?;
                    String::new()
                },
                Commands::Auth(_) | Commands::Completions { .. } => String::new(),
            }
        },
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
