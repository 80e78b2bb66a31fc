mod deploy;
mod init;

use {
    crate::{deploy::DeployCmd, init::InitCmd},
    clap::Parser,
    std::path::PathBuf,
    swayswap_deployment::{default_env_file, load_env_file, NODE_ENV},
    tracing::metadata::LevelFilter,
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Env file to load variables from; variables already set take precedence [default: ./docker/.env, or ./docker/.env.test if NODE_ENV=test]
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Maximum level of log messages: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Deploy the contracts listed in the manifest, and write their IDs to the
    /// frontend's env file
    Deploy(DeployCmd),

    /// Initialize the tokens, seed the pools, and register them
    Init(InitCmd),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Set up tracing.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level.parse::<LevelFilter>()?)
        .init();

    // Load the env file, before any configuration is read.
    let env_file = cli
        .env_file
        .unwrap_or_else(|| default_env_file(std::env::var(NODE_ENV).ok().as_deref()));
    load_env_file(&env_file)?;

    match cli.command {
        Command::Deploy(cmd) => cmd.run().await,
        Command::Init(cmd) => cmd.run().await,
    }
}
