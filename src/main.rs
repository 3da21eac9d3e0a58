use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use analytics_events_gen::config::GeneratorOptions;

/// Generate Kotlin analytics event classes from a JSON event schema.
///
/// Reads a schema of categories, events and parameters and writes one
/// Kotlin file per category plus the shared BaseEvent type.
#[derive(Parser)]
#[command(name = "analytics-events-gen", version, about)]
struct Cli {
    /// Only log warnings and errors.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate event classes for every category in the schema.
    Generate {
        /// Event schema JSON file.
        #[arg(long, env = "EVENTS_SCHEMA_FILE")]
        schema: PathBuf,

        /// Output directory for generated sources.
        #[arg(long, env = "EVENTS_DEST_PATH")]
        dest: PathBuf,

        /// Base Kotlin package for generated sources.
        ///
        /// Example: --package com.example.analytics
        #[arg(long, env = "EVENTS_PACKAGE_NAME")]
        package: String,

        /// Fail when an event has no screen_name parameter.
        #[arg(long, env = "EVENTS_STRICT_SCREEN_NAME")]
        strict_screen_name: bool,

        /// Print generated sources to stdout instead of writing them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate only the shared BaseEvent type.
    BaseEvent {
        /// Output directory for generated sources.
        #[arg(long, env = "EVENTS_DEST_PATH")]
        dest: PathBuf,

        /// Base Kotlin package for generated sources.
        #[arg(long, env = "EVENTS_PACKAGE_NAME")]
        package: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> analytics_events_gen::error::Result<()> {
    match cli.command {
        Commands::Generate {
            schema,
            dest,
            package,
            strict_screen_name,
            dry_run,
        } => {
            let options = GeneratorOptions::new(dest, package).strict_screen_name(strict_screen_name);

            let stats = if dry_run {
                let categories = analytics_events_gen::schema::load_schema(&schema)?;
                let (files, stats) = analytics_events_gen::codegen::render_all(&categories, &options)?;
                for file in files {
                    println!("// {}", file.path.display());
                    print!("{}", file.contents);
                    println!();
                }
                stats
            } else {
                analytics_events_gen::codegen::generate_from_file(&schema, &options)?
            };

            info!(
                "Generated {} categories, {} events ({} simple, {} parameterized), {} constants",
                stats.categories_generated,
                stats.events_generated,
                stats.simple_events,
                stats.parameterized_events,
                stats.constants_generated
            );
        }

        Commands::BaseEvent { dest, package } => {
            let options = GeneratorOptions::new(dest, package);
            let path = analytics_events_gen::codegen::generate_base_type(&options)?;
            info!("Generated {}", path.display());
        }
    }

    Ok(())
}
