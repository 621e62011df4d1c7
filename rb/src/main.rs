//! rb - render bridge host
//!
//! Builds the export registry once and calls exports by name.

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result, eyre};
use kvstore::{FileKv, KvStore, MemoryKv};
use tokio::runtime::Handle;
use tracing::info;

use renderbridge::cli::{Cli, Command};
use renderbridge::config::{Config, KvBackend};
use renderbridge::{ExportDeps, HostValue, SystemClock, TemplateRenderer, standard_registry};

fn setup_logging(verbose: bool) -> Result<()> {
    // stdout carries the rendered HTML only
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn open_store(config: &Config) -> Result<Arc<dyn KvStore>> {
    Ok(match config.kv.backend {
        KvBackend::File => Arc::new(FileKv::open(&config.kv.store_path).context("Failed to open KV store")?),
        KvBackend::Memory => Arc::new(MemoryKv::new()),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let renderer = TemplateRenderer::new(config.render.templates_dir.as_deref()).context("Failed to load templates")?;
    let deps = ExportDeps {
        renderer: Arc::new(renderer),
        clock: Arc::new(SystemClock),
        store: open_store(&config)?,
        settings: config.export_settings(),
    };
    let registry = standard_registry(deps, Handle::current());

    match cli.command {
        Command::Call { export, args } => {
            let args: Vec<HostValue> = args.iter().map(|a| HostValue::parse_arg(a)).collect();
            info!(%export, args = args.len(), "Calling export");

            let result = registry.call(&export, args)?;
            match result.into_text().await {
                Ok(html) => {
                    println!("{}", html);
                    Ok(())
                }
                Err(reason) => Err(eyre!("{} rejected: {}", export, reason)),
            }
        }
        Command::Exports => {
            for name in registry.names() {
                if let Some(kind) = registry.kind(&name) {
                    println!("{:<24} {}", name, kind);
                }
            }
            Ok(())
        }
    }
}
