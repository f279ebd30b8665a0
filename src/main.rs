use clap::Parser;
use semantic_qa::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Ask { question } => cli::ask::run(question).await,
        Command::Seed { file } => cli::seed::run(&file).await,
    }
}
