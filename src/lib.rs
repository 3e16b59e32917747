pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use config::GeneralConfig;
pub use error::{GraylogError, Result};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.graylog.api_url = url;
    }

    init_tracing(&config.general);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cli::cmd_run(&config).await,
        Commands::Check => cli::cmd_check(&config).await,
        Commands::Promote { names } => cli::cmd_promote(&config, &names).await,
        Commands::Delete { name } => cli::cmd_delete_user(&config, &name).await,
        Commands::Init => cli::cmd_init(),
    }
}

fn init_tracing(general: &GeneralConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if general.log_format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
