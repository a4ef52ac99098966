mod catalog;
mod cli;
mod commands;
mod config;
mod error;
mod identity;
mod pipeline;
mod post;
mod tags;
mod tracks;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "releasepost=debug".to_string()
        } else if cli.quiet {
            "releasepost=warn".to_string()
        } else {
            "releasepost=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Post {
            file,
            caption,
            size,
            mediainfo,
            no_probe,
            synopsis_url,
            json,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::post::run(
                &config,
                &file,
                commands::post::PostOptions {
                    caption,
                    size,
                    mediainfo,
                    no_probe,
                    synopsis_url,
                    json,
                },
            )?;
        }
        Commands::PostAll {
            dir,
            caption,
            no_probe,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::post_all::run(&config, &dir, caption.as_deref(), no_probe, cli.quiet)?;
        }
        Commands::Identify { file, caption } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::identify::run(&config, &file, caption.as_deref())?;
        }
        Commands::Tracks {
            file,
            mediainfo,
            json,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::tracks::run(&config, &file, mediainfo.as_deref(), json)?;
        }
        Commands::Fields => {
            commands::fields::run()?;
        }
        Commands::Init { force } => {
            commands::init::run(cli.config.as_deref(), force)?;
        }
    }

    Ok(())
}
