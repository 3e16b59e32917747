//! Init command handler

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Created config.toml");
        println!("Set ADMIN_PASSWORD in the environment before running.");
    } else {
        println!("config.toml already exists");
    }
    Ok(())
}
