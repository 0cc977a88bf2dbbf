mod cli;
mod commands;
mod payload;

use clap::Parser;

use crate::cli::CliArgs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    if let Err(e) = cli::run(args) {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
