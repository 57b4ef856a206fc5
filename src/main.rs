use clap::Parser;
use sortwords::app::handle_fatal_error;
use sortwords::cli::{execute_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = execute_command(cli).await {
        handle_fatal_error(e, verbose);
    }
}
