//! Account commands

use anyhow::Result;
use tracing::info;

use super::{block_on, print_json, Context};

pub fn me(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let profile = block_on(client.me())??;
    print_json(&profile)
}

pub fn balances(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let balances = block_on(client.accounts().get_balances())??;
    info!("Found {} wallets", balances.len());
    print_json(&balances)
}
