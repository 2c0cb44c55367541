//! Raw GraphQL command

use anyhow::{Context as _, Result};
use serde_json::Value;

use super::{block_on, print_json, Context};

pub fn run(ctx: &Context, document: &str, variables: Option<&str>) -> Result<()> {
    let variables: Value = match variables {
        Some(raw) => serde_json::from_str(raw).context("Failed to parse --variables JSON")?,
        None => Value::Null,
    };

    let client = ctx.client()?;
    let data = block_on(client.api().call(document, variables))??;
    print_json(&data)
}
