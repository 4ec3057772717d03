//! prisma-joi CLI - Command-line interface for the prisma-joi generator.

use clap::Parser;

use prisma_joi_cli::cli::{Cli, Command};
use prisma_joi_cli::commands;
use prisma_joi_cli::error::CliResult;
use prisma_joi_cli::{logging, output};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Generate(args) => commands::generate::run(args).await,
        Command::CheckConfig(args) => commands::check_config::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
