//! Serve command - run the HTTP upload server.

use clap::Args;
use tracing::info;

use docproc_server::AppState;

use super::{build_processor, load_config};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Listen address (overrides config and DOCPROC_BIND)
    #[arg(short, long)]
    bind: Option<String>,

    /// Skip drug label lookups
    #[arg(long)]
    offline: bool,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    if args.offline || !config.drug_info.enabled {
        info!("Drug label lookups disabled");
    } else {
        info!("Drug label lookups via {}", config.drug_info.base_url);
    }

    let processor = build_processor(config, args.offline)?;
    docproc_server::serve(&bind, AppState::new(processor)).await?;

    Ok(())
}
