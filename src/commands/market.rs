//! Market data commands

use anyhow::Result;
use tracing::warn;

use super::{block_on, print_json, Context};

pub fn list(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let markets = block_on(client.markets().get_markets())??;
    print_json(&markets)
}

pub fn show(ctx: &Context, code: &str) -> Result<()> {
    let client = ctx.client()?;
    let market = block_on(client.markets().get_market(code))??;
    if market.is_none() {
        warn!("Market {} not found", code);
    }
    print_json(&market)
}

pub fn orderbook(ctx: &Context, code: &str, limit: u32) -> Result<()> {
    let client = ctx.client()?;
    let book = block_on(client.markets().get_orderbook(code, limit))??;
    print_json(&book)
}

pub fn stats(ctx: &Context, code: &str) -> Result<()> {
    let client = ctx.client()?;
    let stats = block_on(client.markets().get_market_stats(code))??;
    if stats.is_none() {
        warn!("No stats available for {}", code);
    }
    print_json(&stats)
}
