use clap::Parser;
use tracing_subscriber::EnvFilter;

use codenoscopy::client::{self, ReviewClient};
use codenoscopy::config::{Cli, Command};
use codenoscopy::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional, real environment wins
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => server::serve(args).await,
        Command::Review(args) => {
            let code = client::read_source(&args.file)?;
            let review_client = ReviewClient::new(&args.server, std::time::Duration::from_secs(args.timeout_secs));
            client::run_review(&review_client, &args, code).await
        }
    }
}
