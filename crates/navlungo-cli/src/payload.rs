use std::io::Read;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde_json::{Map, Value};

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// JSON file holding the request body, or `-` to read it from stdin.
    #[arg(value_name = "FILE")]
    pub payload: PathBuf,
}

impl PayloadArgs {
    pub fn read(&self) -> anyhow::Result<Value> {
        let text = if self.payload.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.payload)
                .with_context(|| format!("Failed to read {}", self.payload.display()))?
        };

        parse_payload(&text)
    }
}

fn parse_payload(text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text).context("Payload is not valid JSON")
}

#[derive(Args, Debug, Default)]
pub struct PageArgs {
    /// Page size.
    #[arg(long)]
    pub limit: Option<u32>,

    /// Page number, starting at 1.
    #[arg(long)]
    pub page: Option<u32>,

    /// Filter as `key=value`. Repeatable.
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

impl PageArgs {
    /// Only flags that were given end up in the body; the request schema
    /// fills in the default limit and page for the rest.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(limit) = self.limit {
            body.insert("limit".to_string(), limit.into());
        }
        if let Some(page) = self.page {
            body.insert("page".to_string(), page.into());
        }
        if !self.filters.is_empty() {
            let filters = self
                .filters
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect::<Map<_, _>>();
            body.insert("filters".to_string(), Value::Object(filters));
        }
        Value::Object(body)
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}
