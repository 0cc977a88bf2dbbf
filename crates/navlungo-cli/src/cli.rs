use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use navlungo_api::{Client, ClientConfig, Environment, NavlungoCredentials};

use crate::commands;
use crate::payload::{PageArgs, PayloadArgs};

#[derive(Parser, Debug)]
#[command(name = "navlungo", author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Deployment to talk to (`test` or `production`).
    #[arg(long, global = true, env = "NAVLUNGO_ENV", default_value = "production")]
    pub env: Environment,

    /// Base URL overriding the one implied by `--env`.
    #[arg(long, global = true, env = "NAVLUNGO_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token to authenticate with.
    #[arg(long, global = true, env = "NAVLUNGO_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Username used to obtain a token when none is given.
    /// Falls back to `NAVLUNGO_USERNAME`/`NAVLUNGO_PASSWORD` when neither flag is set.
    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "NAVLUNGO_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::for_environment(self.env);
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(token) = &self.token {
            config = config.with_api_token(token);
        }
        config
    }

    pub fn credentials(&self) -> Option<NavlungoCredentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(NavlungoCredentials::new(username, password)),
            (None, None) => NavlungoCredentials::from_env().ok(),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exchange username and password for a bearer token.
    Login,
    /// Create posts from a JSON payload.
    CreatePost(PayloadArgs),
    /// Update a post from a JSON payload.
    UpdatePost(PayloadArgs),
    /// Show the state of a post.
    CheckPost { post_number: String },
    /// Cancel a post.
    CancelPost { post_number: String },
    /// Create an address-book entry from a JSON payload.
    CreateAddress(PayloadArgs),
    /// Replace an address-book entry from a JSON payload.
    UpdateAddress {
        address_id: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Show one address-book entry.
    GetAddress { address_id: u64 },
    /// List address-book entries.
    GetAddresses(PageArgs),
    /// Delete an address-book entry.
    DeleteAddress { address_id: u64 },
    /// List carriers.
    Carriers {
        /// Only carriers enabled for this account.
        #[arg(long)]
        mine: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Fetch the shipping label of a post.
    Barcode {
        post_number: String,
        /// Label format: pdf, html or zpl.
        #[arg(long = "type", default_value = "pdf")]
        barcode_type: String,
    },
}

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut client =
        Client::from_config(&args.connection.config()).context("Failed to create client")?;
    log::debug!("Using {client:?}");

    let response = match args.command {
        Commands::Login => {
            let credentials = args
                .connection
                .credentials()
                .context(
                    "login requires --username and --password, \
                     or NAVLUNGO_USERNAME and NAVLUNGO_PASSWORD",
                )?;
            client.login(&credentials).context("Failed to log in")?
        }
        command => {
            if client.token().is_none() {
                if let Some(credentials) = args.connection.credentials() {
                    client.login(&credentials).context("Failed to log in")?;
                }
            }
            commands::handle_command(command, &client)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
