use mensa_rating_rs::constants::{DEFAULT_BIND, DEV_ORIGINS, MENSA_DB};
use mensa_rating_rs::shared_main::{logger_init, run_server, ServerConfig};

use clap::Parser;
use log::log_enabled;

/// REST backend for rating the dishes of campus canteens.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// SQLite database file, ':memory:' for a throwaway database
    #[arg(short, long, env = "MENSA_DB", default_value = MENSA_DB)]
    db_file: String,
    /// Address to listen on
    #[arg(short, long, env = "MENSA_BIND", default_value = DEFAULT_BIND)]
    bind: String,
    /// Origin allowed to call the API (repeatable){n}[defaults to the local dev frontends]
    #[arg(long = "cors-origin", env = "MENSA_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,
    /// Do not load sample canteens into an empty database
    #[arg(long)]
    no_seed: bool,
    /// Enable verbose logging (every mutating request){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());
    log::info!("Starting mensa rating server...");

    if !(log_enabled!(log::Level::Debug) || log_enabled!(log::Level::Trace)) {
        log::info!("Enable verbose logging to see request details");
    }

    let cors_origins = if args.cors_origins.is_empty() {
        DEV_ORIGINS.iter().map(|o| o.to_string()).collect()
    } else {
        args.cors_origins
    };

    run_server(ServerConfig {
        db_file: args.db_file,
        bind: args.bind,
        cors_origins,
        seed: !args.no_seed,
    })
    .await
}
