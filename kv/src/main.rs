use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use kvstore::cli::{Cli, Command};
use kvstore::config::Config;
use kvstore::{FileKv, KvStore};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let store_path = cli.store.unwrap_or(config.store_path);

    info!("kv starting on {}", store_path.display());
    let store = FileKv::open(&store_path).context("Failed to open store")?;

    match cli.command {
        Command::Get { key } => {
            let value = store.get(&key).await?;
            println!("{}", value);
        }
        Command::Set { key, value } => {
            store.set(&key, &value).await?;
            println!("{} {} = {}", "✓".green(), key.cyan(), value);
        }
        Command::List => {
            let keys = store.keys().await?;
            if keys.is_empty() {
                println!("No keys stored");
            } else {
                for key in keys {
                    println!("{}", key);
                }
            }
        }
    }

    Ok(())
}
