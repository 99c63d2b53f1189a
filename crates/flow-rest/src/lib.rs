//! Flow REST client library.
//!
//! Async HTTP client for the Flow access node REST API (blocks, accounts,
//! transactions, events, scripts), plus the glue that turns a
//! `flow_tx::SignedTransaction` into a submittable request.
//!
//! # Example
//!
//! ```ignore
//! use flow_rest::FlowRest;
//! use flow_types::Network;
//!
//! #[tokio::main]
//! async fn main() {
//!     let flow = FlowRest::for_network(Network::Testnet).unwrap();
//!     let block = flow.get_latest_block(true).await.unwrap();
//!     println!("Sealed height: {}", block.header.height);
//! }
//! ```

pub mod client;
pub mod error;
pub mod flow;
pub mod models;
pub mod transaction;

pub use client::{RestClient, RestConfig};
pub use error::RestError;
pub use flow::FlowRest;
pub use models::{ExecuteScriptRequest, TransactionRequest};
pub use transaction::prepare_simple_transaction;

use flow_types::Network;

/// Access node base URLs per network.
pub mod endpoints {
    pub const LOCALHOST: &str = "http://127.0.0.1:8888/v1";
    pub const TESTNET: &str = "https://rest-testnet.onflow.org/v1";
    pub const MAINNET: &str = "https://rest-mainnet.onflow.org/v1";
}

/// Base URL for a network.
pub fn endpoint(network: Network) -> &'static str {
    match network {
        Network::Localhost => endpoints::LOCALHOST,
        Network::Testnet => endpoints::TESTNET,
        Network::Mainnet => endpoints::MAINNET,
    }
}
