//! Access node API.
//!
//! Typed async methods for the REST endpoints a client needs to read chain
//! state, run scripts and submit signed transactions.

use crate::client::{RestClient, RestConfig};
use crate::error::RestError;
use crate::models::{
    AccountResponse, BlockResponse, EventsResponse, ExecuteScriptRequest, TransactionRequest,
    TransactionResponse, TransactionResultResponse,
};
use base64::Engine;
use flow_types::Network;

/// Flow access node client.
pub struct FlowRest {
    client: RestClient,
}

impl FlowRest {
    /// Create a client for the given base URL (including `/v1`).
    pub fn new(url: &str) -> Result<Self, RestError> {
        Ok(Self {
            client: RestClient::new(url)?,
        })
    }

    /// Create a client for one of the public networks.
    pub fn for_network(network: Network) -> Result<Self, RestError> {
        Self::new(crate::endpoint(network))
    }

    /// Create with full configuration.
    pub fn with_config(config: RestConfig) -> Result<Self, RestError> {
        Ok(Self {
            client: RestClient::with_config(config)?,
        })
    }

    /// Get the underlying REST client for custom calls.
    pub fn client(&self) -> &RestClient {
        &self.client
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Latest sealed (or, with `sealed == false`, finalized) block.
    pub async fn get_latest_block(&self, sealed: bool) -> Result<BlockResponse, RestError> {
        let height = if sealed { "sealed" } else { "final" };
        let blocks: Vec<BlockResponse> = self
            .client
            .get("/blocks", &[("height", height.to_string())])
            .await?;
        first_block(blocks, height)
    }

    pub async fn get_block_by_id(&self, id: &str) -> Result<BlockResponse, RestError> {
        let id = strip_hex_prefix(id);
        let blocks: Vec<BlockResponse> = self.client.get(&format!("/blocks/{}", id), &[]).await?;
        first_block(blocks, id)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub async fn get_transaction(&self, id: &str) -> Result<TransactionResponse, RestError> {
        self.client
            .get(&format!("/transactions/{}", strip_hex_prefix(id)), &[])
            .await
    }

    pub async fn get_transaction_result(
        &self,
        id: &str,
    ) -> Result<TransactionResultResponse, RestError> {
        self.client
            .get(&format!("/transaction_results/{}", strip_hex_prefix(id)), &[])
            .await
    }

    /// Submit a signed transaction. The response carries the transaction id.
    pub async fn submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, RestError> {
        let resp: TransactionResponse = self.client.post("/transactions", &[], request).await?;
        log::info!("submitted transaction {}", resp.id);
        Ok(resp)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Account with its keys and contracts expanded.
    pub async fn get_account(&self, address: &str) -> Result<AccountResponse, RestError> {
        self.client
            .get(
                &format!("/accounts/{}", strip_hex_prefix(address)),
                &[("expand", "keys,contracts".to_string())],
            )
            .await
    }

    // =========================================================================
    // Scripts
    // =========================================================================

    /// Execute a read-only script against the latest sealed block and decode
    /// its JSON-Cadence result.
    pub async fn execute_script(
        &self,
        request: &ExecuteScriptRequest,
    ) -> Result<serde_json::Value, RestError> {
        let encoded: String = self
            .client
            .post("/scripts", &[("block_height", "sealed".to_string())], request)
            .await?;
        let raw = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
        Ok(serde_json::from_slice(&raw)?)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Events of one type in the inclusive height range `[start, end]`.
    pub async fn get_events_within_block_height(
        &self,
        event_type: &str,
        start: u64,
        end: u64,
    ) -> Result<Vec<EventsResponse>, RestError> {
        if start > end {
            return Err(RestError::Other(format!(
                "start height {} is above end height {}",
                start, end
            )));
        }
        self.client
            .get(
                "/events",
                &[
                    ("type", event_type.to_string()),
                    ("start_height", start.to_string()),
                    ("end_height", end.to_string()),
                ],
            )
            .await
    }

    /// Events of one type in the given blocks.
    pub async fn get_events(
        &self,
        event_type: &str,
        block_ids: &[&str],
    ) -> Result<Vec<EventsResponse>, RestError> {
        let ids: Vec<&str> = block_ids.iter().map(|id| strip_hex_prefix(id)).collect();
        self.client
            .get(
                "/events",
                &[
                    ("type", event_type.to_string()),
                    ("block_ids", ids.join(",")),
                ],
            )
            .await
    }
}

fn first_block(blocks: Vec<BlockResponse>, what: &str) -> Result<BlockResponse, RestError> {
    blocks
        .into_iter()
        .next()
        .ok_or_else(|| RestError::NotFound(format!("block {}", what)))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}
