//! ugreen-leds — disk and network health LEDs for UGREEN NAS appliances.

use std::path::PathBuf;

use clap::Parser;
use ugreen_leds_lib::config::DEFAULT_CONFIG_PATH;

mod cli;

#[derive(Parser)]
#[command(
    name = "ugreen-leds",
    version,
    about = "Disk and network health LEDs for UGREEN NAS appliances"
)]
struct Args {
    /// Configuration file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output as JSON (for config, map, status)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_secs()
        .format_target(false)
        .init();

    if let Err(e) = cli::run(args.command, &args.config, args.json) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
