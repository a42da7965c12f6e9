use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use content_manifest::ManifestContext;
use content_manifest::cli::Cli;
use content_manifest::commands::update::{self, UpdateOptions};
use content_manifest::config::Config;
use content_manifest::config::parser::validate_config;
use content_manifest::output::{self, Verbosity};
use std::io;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::error(&format!("{e:#}"));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    init_tracing(cli.verbose);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    output::set_verbosity(verbosity);

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        output::info(&format!("Using configuration from {}", path.display()));
    }
    config.apply_overrides(cli.content_dir, cli.manifest_name);
    validate_config(&config)?;

    let ctx = ManifestContext::new(config);
    let options = UpdateOptions {
        dry_run: cli.dry_run,
        verbosity,
    };

    let mut stdout = io::stdout().lock();
    update::execute(&ctx, &options, &mut stdout)?;
    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the report
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "content_manifest=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
