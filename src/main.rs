mod cli;

use std::collections::BTreeMap;

use clap::Parser;
use cli::{Cli, Commands};
use qrlabel::config::Config;
use qrlabel::layout::LabelSize;
use qrlabel::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => {
            info!("Loading configuration");
            let mut config =
                Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

            if let Some(address) = args.address {
                config.server.bind_addr = address;
            }

            qrlabel::api::run(config).await?
        }
        Commands::Layouts => {
            let layouts: BTreeMap<_, _> = LabelSize::KNOWN
                .iter()
                .map(|size| (size.as_str().to_string(), size.descriptor()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&layouts)?);
        }
    }

    Ok(())
}
