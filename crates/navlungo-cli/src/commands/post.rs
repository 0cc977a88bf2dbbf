use anyhow::Context as _;
use navlungo_api::Client;
use serde_json::{Value, json};

use crate::payload::PayloadArgs;

pub fn create(client: &Client, payload: &PayloadArgs) -> anyhow::Result<Value> {
    let data = payload.read()?;
    client.create_post(&data).context("Failed to create posts")
}

pub fn update(client: &Client, payload: &PayloadArgs) -> anyhow::Result<Value> {
    let data = payload.read()?;
    client.update_post(&data).context("Failed to update post")
}

pub fn check(client: &Client, post_number: &str) -> anyhow::Result<Value> {
    client
        .check_post(post_number)
        .with_context(|| format!("Failed to check post {post_number}"))
}

pub fn cancel(client: &Client, post_number: &str) -> anyhow::Result<Value> {
    client
        .cancel_post(&cancel_body(post_number))
        .with_context(|| format!("Failed to cancel post {post_number}"))
}

pub fn barcode(client: &Client, post_number: &str, barcode_type: &str) -> anyhow::Result<Value> {
    client
        .get_barcode(&barcode_body(post_number, barcode_type))
        .with_context(|| format!("Failed to fetch barcode for post {post_number}"))
}

fn cancel_body(post_number: &str) -> Value {
    json!({ "post_number": post_number })
}

fn barcode_body(post_number: &str, barcode_type: &str) -> Value {
    json!({ "post_number": post_number, "barcode_type": barcode_type })
}
