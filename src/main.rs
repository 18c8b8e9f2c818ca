//! rbac-api - user, role and permission service

#![allow(missing_docs)]

use clap::Parser;
use rbac_api::server;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "rbac-api", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "RBAC_CONFIG", default_value = "config/rbac.yaml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long, env = "RBAC_LOG_JSON")]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,sea_orm_migration=warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    server::run_server(&args.config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.json_logs);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, keeps the message readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
