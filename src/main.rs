//! fivewh binary entry point.

mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{init_logging, Cli, Command};
use fivewh::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = Config::from_env()?;

    match cli.command {
        Some(Command::Analyze { profession, topic }) => {
            cli::analyze::cmd_analyze(config, profession, topic).await
        }
        Some(Command::Serve {
            bind,
            port,
            static_dir,
        }) => cli::serve::cmd_serve(config, bind, port, static_dir).await,
        None => cli::serve::cmd_serve(config, None, None, None).await,
    }
}
