use clap::{Parser, Subcommand};
use flow_types::Network;
use std::path::PathBuf;

mod commands;

/// Flow access node command-line interface.
#[derive(Parser)]
#[command(name = "flow-rest-cli")]
#[command(about = "Query a Flow access node and submit signed transactions")]
#[command(version)]
struct Cli {
    /// Network to use (localhost, testnet, mainnet).
    #[arg(long, default_value = "localhost")]
    network: Network,

    /// Access node REST URL (overrides the default for the selected network).
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new P-256 key pair.
    Keygen,

    /// Show an account's balance, keys and contracts.
    Account {
        /// Account address (hex).
        address: String,
    },

    /// Show the latest block.
    Block {
        /// Use the latest sealed block instead of the latest finalized one.
        #[arg(long)]
        sealed: bool,
    },

    /// Show a block by id.
    BlockById {
        /// Block id (hex).
        id: String,
    },

    /// Show a transaction.
    Tx {
        /// Transaction id (hex).
        id: String,
    },

    /// Show a transaction's execution result.
    TxResult {
        /// Transaction id (hex).
        id: String,
    },

    /// Execute a read-only Cadence script.
    Script {
        /// Path to the Cadence source.
        file: PathBuf,

        /// Script argument as a JSON literal (repeatable), e.g. `42`, `"hi"`, `[1,2]`.
        #[arg(long = "arg")]
        args: Vec<String>,
    },

    /// Sign and submit a transaction where one key proposes, pays and authorizes.
    Send {
        /// Path to the Cadence source.
        file: PathBuf,

        /// Signing account address (hex).
        #[arg(long)]
        address: String,

        /// Private key (hex).
        #[arg(long)]
        private_key: String,

        /// Key index on the account.
        #[arg(long, default_value = "0")]
        key_index: u64,

        /// Transaction argument as a JSON literal (repeatable).
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}

/// Application context shared across commands.
pub struct AppContext {
    pub url: String,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        let url = cli
            .url
            .clone()
            .unwrap_or_else(|| flow_rest::endpoint(cli.network).to_string());
        Self { url }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);
    log::debug!("network {} at {}", cli.network, ctx.url);

    let result = match cli.command {
        Commands::Keygen => commands::keygen(),
        Commands::Account { address } => commands::show_account(&ctx, &address).await,
        Commands::Block { sealed } => commands::show_latest_block(&ctx, sealed).await,
        Commands::BlockById { id } => commands::show_block(&ctx, &id).await,
        Commands::Tx { id } => commands::show_transaction(&ctx, &id).await,
        Commands::TxResult { id } => commands::show_transaction_result(&ctx, &id).await,
        Commands::Script { file, args } => commands::run_script(&ctx, &file, &args).await,
        Commands::Send {
            file,
            address,
            private_key,
            key_index,
            args,
        } => commands::send(&ctx, &file, &address, &private_key, key_index, &args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
