//! Promote command handler

use tokio::signal;
use tracing::info;

use crate::clients::GraylogClient;
use crate::config::Config;
use crate::services::{WaitOutcome, promote_all, wait_for_api};

/// Waits for the API, then promotes `names`. Ctrl+C aborts the wait.
pub async fn cmd_promote(config: &Config, names: &[String]) -> anyhow::Result<()> {
    config.validate()?;
    let client = GraylogClient::new(&config.graylog)?;

    let shutdown = async {
        let _ = signal::ctrl_c().await;
    };
    let outcome = wait_for_api(&client, config.graylog.poll_interval(), shutdown).await;

    if outcome == WaitOutcome::Cancelled {
        info!("Interrupted while waiting for the Graylog API");
        return Ok(());
    }

    let report = promote_all(&client, names, config.graylog.missing_user_policy).await;

    println!(
        "Created: {} | Promoted: {} | Already admin: {} | Failed: {}",
        report.created, report.promoted, report.unchanged, report.failed
    );

    if report.failed > 0 {
        anyhow::bail!("{} of {} users could not be promoted", report.failed, names.len());
    }

    Ok(())
}
