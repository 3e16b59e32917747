//! Delete user command handler

use anyhow::Context;

use crate::clients::GraylogClient;
use crate::config::Config;

pub async fn cmd_delete_user(config: &Config, name: &str) -> anyhow::Result<()> {
    config.validate()?;
    let client = GraylogClient::new(&config.graylog)?;

    client
        .delete_user(name)
        .await
        .with_context(|| format!("Failed to delete user '{name}'"))?;

    println!("✓ Deleted: {name}");
    Ok(())
}
