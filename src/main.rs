mod chapters;
mod cli;
mod commands;
mod config;
mod extract;
mod metadata;
mod toolkit;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use toolkit::Toolkit;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let toolkit = Toolkit::new(&config.tools);

    match cli.command {
        Commands::Tree {
            file,
            json,
            min_duration,
        } => {
            commands::tree::run(
                &toolkit,
                &file,
                json,
                config.min_duration(min_duration),
                &config.chapters.indent,
                cli.quiet,
            )?;
        }
        Commands::Metadata { chapters, output } => {
            commands::metadata::run(&chapters, output.as_deref())?;
        }
        Commands::Overwrite {
            input,
            chapters,
            output,
            no_dry_run,
        } => {
            commands::overwrite::run(&toolkit, &input, &chapters, &output, no_dry_run, cli.quiet)?;
        }
        Commands::Extract {
            input,
            output,
            prefix,
            min_duration,
            no_dry_run,
        } => {
            commands::extract::run(
                &toolkit,
                &input,
                &output,
                &prefix,
                config.min_duration(min_duration),
                no_dry_run,
            )?;
        }
        Commands::Parts {
            files,
            titles_file,
            chapter_threshold,
            output,
        } => {
            commands::parts::run(
                &toolkit,
                &files,
                titles_file.as_deref(),
                config.chapter_threshold(chapter_threshold),
                output.as_deref(),
            )?;
        }
        Commands::Check => {
            commands::check::run(&toolkit)?;
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
