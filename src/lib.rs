pub mod cli;
pub mod core;
pub mod store;

pub use cli::plan::{PlanChanges, PlanCommand};

use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Summary,
    Savings,
    Alloc { fund_id: Option<String> },
    Plan(PlanCommand),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Family fund tracker starting...");

    let config = match config_path {
        Some(path) => crate::core::config::AppConfig::load_from_path(path)?,
        None => crate::core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Summary => {
            let store = store::open_read_only(&config);
            cli::summary::run(store.as_ref(), &config).await
        }
        AppCommand::Savings => {
            let store = store::open_read_only(&config);
            cli::savings::run(store.as_ref(), &config).await
        }
        AppCommand::Alloc { fund_id } => {
            let store = store::open_read_only(&config);
            cli::alloc::run(store.as_ref(), &config, fund_id.as_deref()).await
        }
        AppCommand::Plan(plan_command) => {
            let store = store::open(&config)?;
            cli::plan::run(store.as_ref(), plan_command).await
        }
    }
}
