mod cli;
mod commands;
mod config;
mod http;
mod menu;
mod render;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use services::PracticeOrder;

use crate::cli::{Cli, Command};
use crate::config::StorageConfig;
use crate::menu::Menu;

/// Exit code for storage and I/O failures.
const FAILURE: u8 = 2;

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let services = StorageConfig::from_cli(&cli)?.open().await?;

    match cli.command.unwrap_or(Command::Menu { shuffle: false }) {
        Command::Menu { shuffle } => {
            let order = if shuffle {
                PracticeOrder::Shuffled
            } else {
                PracticeOrder::AsStored
            };
            let stdin = std::io::stdin();
            let interactive = stdin.is_terminal();
            let mut menu = Menu::new(services, stdin.lock(), std::io::stdout().lock())
                .with_order(order)
                .with_clear_screen(interactive);
            menu.run().await?;
            Ok(commands::SUCCESS)
        }
        Command::Serve { addr } => {
            http::serve(services, addr).await?;
            Ok(commands::SUCCESS)
        }
        Command::Store(command) => {
            let mut stdout = std::io::stdout().lock();
            commands::run(command, &services, cli.json, &mut stdout).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    config::init_tracing(cli.default_log_level());

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            // At this layer (binary glue), printing once is fine.
            eprintln!("{err:#}");
            ExitCode::from(FAILURE)
        }
    }
}
