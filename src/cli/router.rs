//! Command routing and execution
//!
//! Loads configuration, then hands the run to the matching command.

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::{run_sort_command, run_words_command};
use crate::config::ConfigLoader;
use anyhow::Result;
use clap::CommandFactory;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let working_dir = std::env::current_dir()?;
    let config = match ConfigLoader::new(working_dir)
        .load(cli.config.as_deref())
        .await
    {
        Ok(config) => config,
        Err(e) => {
            crate::app::init_tracing(cli.verbose);
            return Err(e.into());
        }
    };

    match command {
        Commands::Sort(args) => run_sort_command(args, config, cli.verbose).await,
        Commands::Words(args) => run_words_command(args, config, cli.verbose).await,
    }
}
