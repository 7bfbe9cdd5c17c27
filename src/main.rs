//! `toolbox` binary: loads configuration, installs logging, serves the tools.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use toolbox::config::DEFAULT_CONFIG_FILE;
use toolbox::{tools, Config, Error, Server};

/// Stateless text, number and web utility endpoints.
#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, with or without extension
    #[arg(long, short, env = "TOOLBOX_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Listen address, overrides `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides `server.port`
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load_from(&cli.config) {
        Ok(c) => c.with_overrides(cli.host, cli.port),
        Err(e) => {
            eprintln!("toolbox: {e}");
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins over `logging.level`.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let addr = config.socket_addr()?;
    let app = tools::router(&config)?;

    info!(
        cors = config.http.enable_cors,
        access_log = config.logging.access_log,
        fetch_timeout_secs = config.fetch.timeout_secs,
        "starting toolbox"
    );

    Server::bind(addr)
        .await?
        .max_body_size(config.http.max_body_size)
        .serve(app)
        .await
}
