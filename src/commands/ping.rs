//! Ping command implementation

use anyhow::Result;
use tracing::{error, info};

use super::{block_on, print_json, Context};

pub fn run(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status = block_on(client.ping())?;

    if status.is_ok() {
        info!("{}", status.message());
    } else {
        error!("Ping failed: {}", status.message());
    }
    print_json(&status)?;

    if !status.is_ok() {
        anyhow::bail!("Ping failed: {}", status.message());
    }
    Ok(())
}
