//! Default command: provision admins, then stay up until shutdown.

use tokio::signal;
use tracing::{error, info};

use crate::clients::GraylogClient;
use crate::config::Config;
use crate::services::{WaitOutcome, promote_all, wait_for_api};

pub async fn cmd_run(config: &Config) -> anyhow::Result<()> {
    config.validate()?;

    info!(
        "graylog-configurer v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let client = GraylogClient::new(&config.graylog)?;

    let outcome = wait_for_api(&client, config.graylog.poll_interval(), async {
        let _ = signal::ctrl_c().await;
    })
    .await;

    if outcome == WaitOutcome::Cancelled {
        info!("Shutdown signal received before the API became reachable");
        return Ok(());
    }

    if config.graylog.admins.is_empty() {
        info!("No admins configured");
    } else {
        let report = promote_all(
            &client,
            config.graylog.admins.as_slice(),
            config.graylog.missing_user_policy,
        )
        .await;

        info!(
            created = report.created,
            promoted = report.promoted,
            unchanged = report.unchanged,
            failed = report.failed,
            "Admin provisioning finished"
        );
    }

    info!("Going to sleep. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    Ok(())
}
