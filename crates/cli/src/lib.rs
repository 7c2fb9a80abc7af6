//! Library half of the `pathwise` command-line interface.
//!
//! Parses arguments, loads the embedded career catalog, builds the user
//! profile from a profile request file, and dispatches to the command
//! handlers in [`commands`].

pub mod cli;
pub mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use pathwise_catalog::CareerCatalog;
use pathwise_profile::UserProfile;

/// Parse arguments and run the selected command.
pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = CareerCatalog::load()?;
    let output = match cli.command {
        Commands::Recommend {
            profile,
            strategy,
            limit,
            explain,
            format,
        } => {
            let profile = commands::load_profile(&profile)?;
            commands::recommend(&catalog, &profile, strategy.into(), limit, explain, format)?
        }
        Commands::Gaps {
            profile,
            limit,
            format,
        } => {
            let profile = commands::load_profile(&profile)?;
            commands::gaps(&catalog, &profile, limit, format)?
        }
        Commands::Courses {
            profile,
            skills,
            limit,
            format,
        } => {
            let profile = commands::load_profile(&profile)?;
            commands::courses(&catalog, &profile, &skills, limit, format)?
        }
        Commands::Trajectory {
            role,
            profile,
            horizon,
            format,
        } => {
            let profile = match profile {
                Some(path) => commands::load_profile(&path)?,
                None => UserProfile::default(),
            };
            commands::trajectory(&catalog, &role, &profile, horizon, format)?
        }
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
