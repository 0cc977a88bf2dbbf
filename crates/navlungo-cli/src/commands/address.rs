use anyhow::Context as _;
use navlungo_api::Client;
use serde_json::Value;

use crate::payload::{PageArgs, PayloadArgs};

pub fn create(client: &Client, payload: &PayloadArgs) -> anyhow::Result<Value> {
    let data = payload.read()?;
    client.create_address(&data).context("Failed to create address")
}

pub fn update(client: &Client, address_id: u64, payload: &PayloadArgs) -> anyhow::Result<Value> {
    let data = payload.read()?;
    client
        .update_address(address_id, &data)
        .with_context(|| format!("Failed to update address {address_id}"))
}

pub fn get(client: &Client, address_id: u64) -> anyhow::Result<Value> {
    client
        .get_address(address_id)
        .with_context(|| format!("Failed to fetch address {address_id}"))
}

pub fn list(client: &Client, page: &PageArgs) -> anyhow::Result<Value> {
    client
        .get_all_addresses(&page.to_json())
        .context("Failed to list addresses")
}

pub fn delete(client: &Client, address_id: u64) -> anyhow::Result<Value> {
    client
        .delete_address(address_id)
        .with_context(|| format!("Failed to delete address {address_id}"))
}
