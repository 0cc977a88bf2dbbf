use navlungo_api::Client;
use serde_json::Value;

use crate::cli::Commands;

pub mod address;
pub mod carrier;
pub mod post;

/// Runs one authenticated subcommand and returns the API response.
pub fn handle_command(command: Commands, client: &Client) -> anyhow::Result<Value> {
    match command {
        Commands::Login => anyhow::bail!("login is handled before dispatch"),
        Commands::CreatePost(payload) => post::create(client, &payload),
        Commands::UpdatePost(payload) => post::update(client, &payload),
        Commands::CheckPost { post_number } => post::check(client, &post_number),
        Commands::CancelPost { post_number } => post::cancel(client, &post_number),
        Commands::Barcode {
            post_number,
            barcode_type,
        } => post::barcode(client, &post_number, &barcode_type),
        Commands::CreateAddress(payload) => address::create(client, &payload),
        Commands::UpdateAddress {
            address_id,
            payload,
        } => address::update(client, address_id, &payload),
        Commands::GetAddress { address_id } => address::get(client, address_id),
        Commands::GetAddresses(page) => address::list(client, &page),
        Commands::DeleteAddress { address_id } => address::delete(client, address_id),
        Commands::Carriers { mine, page } => carrier::list(client, mine, &page),
    }
}
