//! Reachability check command handler

use crate::clients::GraylogClient;
use crate::config::Config;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    let client = GraylogClient::new(&config.graylog)?;

    match client.api_reachable().await {
        Ok(()) => {
            println!("✓ Graylog API reachable at {}", client.base_url());
            Ok(())
        }
        Err(e) => anyhow::bail!("Graylog API not reachable: {e}"),
    }
}
