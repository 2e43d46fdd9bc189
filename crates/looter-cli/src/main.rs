mod extract;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "looter-cli")]
#[command(about = "Looter command line interface")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Run a simulated extraction job and print the results
    Extract(extract::ExtractArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Extract(args)) => extract::run_extract(args).await,
        None => {
            println!("looter-cli: use `extract --platform <ig|tk|x>` to run a job");
            Ok(())
        }
    }
}
