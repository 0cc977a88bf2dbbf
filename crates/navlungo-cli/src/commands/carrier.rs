use anyhow::Context as _;
use navlungo_api::Client;
use serde_json::Value;

use crate::payload::PageArgs;

pub fn list(client: &Client, mine: bool, page: &PageArgs) -> anyhow::Result<Value> {
    let body = page.to_json();
    if mine {
        client
            .get_my_carriers(&body)
            .context("Failed to list account carriers")
    } else {
        client.get_all_carriers(&body).context("Failed to list carriers")
    }
}
