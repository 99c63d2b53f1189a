//! CLI command implementations.

use crate::AppContext;
use flow_rest::{prepare_simple_transaction, ExecuteScriptRequest, FlowRest};
use flow_tx::Value;
use flow_types::SigningKey;
use std::path::Path;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn connect(ctx: &AppContext) -> std::result::Result<FlowRest, Box<dyn std::error::Error>> {
    log::info!("connecting to {}", ctx.url);
    Ok(FlowRest::new(&ctx.url)?)
}

/// Map a plain JSON literal onto an argument value. Objects become
/// dictionaries keyed by string.
fn json_to_value(json: &serde_json::Value) -> std::result::Result<Value, String> {
    use serde_json::Value as Json;
    Ok(match json {
        Json::String(s) => Value::String(s.clone()),
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            let integer = n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from));
            if let Some(i) = integer {
                Value::Int(i)
            } else {
                Value::Number(n.as_f64().ok_or_else(|| format!("unsupported number {}", n))?)
            }
        }
        Json::Array(items) => Value::Array(
            items
                .iter()
                .map(json_to_value)
                .collect::<std::result::Result<_, _>>()?,
        ),
        Json::Object(map) => Value::Dictionary(
            map.iter()
                .map(|(k, v)| json_to_value(v).map(|v| (Value::String(k.clone()), v)))
                .collect::<std::result::Result<_, _>>()?,
        ),
        Json::Null => return Err("null is not a supported argument".into()),
    })
}

fn parse_args(args: &[String]) -> std::result::Result<Vec<Value>, Box<dyn std::error::Error>> {
    let mut values = Vec::with_capacity(args.len());
    for raw in args {
        let json: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| format!("argument {:?} is not valid JSON: {}", raw, e))?;
        values.push(json_to_value(&json)?);
    }
    Ok(values)
}

fn read_script(path: &Path) -> std::result::Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e).into())
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub fn keygen() -> Result {
    let pair = flow_crypto::generate_key_pair();
    println!("Private key: {}", pair.private_key);
    println!("Public key:  {}", pair.public_key);
    println!();
    println!("Signature algorithm: {}", flow_types::SignAlgorithm::EcdsaP256);
    println!("Hash algorithm:      {}", flow_types::HashAlgorithm::Sha3_256);
    Ok(())
}

pub async fn show_account(ctx: &AppContext, address: &str) -> Result {
    let flow = connect(ctx)?;
    let account = flow.get_account(address).await?;

    println!("Address: {}", account.address);
    println!("Balance: {}", account.balance);
    println!("Keys:");
    for key in &account.keys {
        println!(
            "  #{} {} {}/{} weight {} seq {}{}",
            key.index,
            key.public_key,
            key.signing_algorithm,
            key.hashing_algorithm,
            key.weight,
            key.sequence_number,
            if key.revoked { " (revoked)" } else { "" }
        );
    }
    if !account.contracts.is_empty() {
        println!("Contracts:");
        for name in account.contracts.keys() {
            println!("  {}", name);
        }
    }
    Ok(())
}

pub async fn show_latest_block(ctx: &AppContext, sealed: bool) -> Result {
    let flow = connect(ctx)?;
    let block = flow.get_latest_block(sealed).await?;
    print_block(&block);
    Ok(())
}

pub async fn show_block(ctx: &AppContext, id: &str) -> Result {
    let flow = connect(ctx)?;
    let block = flow.get_block_by_id(id).await?;
    print_block(&block);
    Ok(())
}

fn print_block(block: &flow_rest::models::BlockResponse) {
    println!("Block {}", block.header.id);
    println!("  Height:    {}", block.header.height);
    println!("  Parent:    {}", block.header.parent_id);
    println!("  Timestamp: {}", block.header.timestamp);
}

pub async fn show_transaction(ctx: &AppContext, id: &str) -> Result {
    let flow = connect(ctx)?;
    let tx = flow.get_transaction(id).await?;

    println!("Transaction {}", tx.id);
    println!("  Reference block: {}", tx.reference_block_id);
    println!("  Gas limit:       {}", tx.gas_limit);
    println!("  Payer:           {}", tx.payer);
    if let Some(ref key) = tx.proposal_key {
        println!(
            "  Proposer:        {}#{} seq {}",
            key.address, key.key_index, key.sequence_number
        );
    }
    println!("  Authorizers:     {}", tx.authorizers.join(", "));
    println!("  Arguments:       {}", tx.arguments.len());
    println!(
        "  Signatures:      {} payload, {} envelope",
        tx.payload_signatures.len(),
        tx.envelope_signatures.len()
    );
    Ok(())
}

pub async fn show_transaction_result(ctx: &AppContext, id: &str) -> Result {
    let flow = connect(ctx)?;
    let result = flow.get_transaction_result(id).await?;

    println!("Status:      {} ({:?})", result.status, result.status());
    println!("Execution:   {}", result.execution);
    println!("Computation: {}", result.computation_used);
    if result.is_error() {
        println!("Error:       {}", result.error_message);
    }
    for event in &result.events {
        println!("  event {} #{}", event.event_type, event.event_index);
    }
    Ok(())
}

pub async fn run_script(ctx: &AppContext, file: &Path, args: &[String]) -> Result {
    let script = read_script(file)?;
    let request = ExecuteScriptRequest::new(&script, &parse_args(args)?)?;

    let flow = connect(ctx)?;
    let result = flow.execute_script(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn send(
    ctx: &AppContext,
    file: &Path,
    address: &str,
    private_key: &str,
    key_index: u64,
    args: &[String],
) -> Result {
    let script = read_script(file)?;
    let arguments = parse_args(args)?;

    let public_key = flow_crypto::public_key_from_private(private_key)?;
    let key = SigningKey::new(address, key_index, hex::decode(public_key)?)
        .with_private_key(hex::decode(private_key.trim_start_matches("0x"))?);

    let flow = connect(ctx)?;
    let request = prepare_simple_transaction(&flow, &script, arguments, &key).await?;
    let submitted = flow.submit_transaction(&request).await?;

    println!("Submitted transaction {}", submitted.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Value {
        json_to_value(&serde_json::from_str(raw).unwrap()).unwrap()
    }

    #[test]
    fn test_json_scalars() {
        assert_eq!(parse(r#""hi""#), Value::String("hi".into()));
        assert_eq!(parse("true"), Value::Bool(true));
        assert_eq!(parse("-7"), Value::Int(-7));
        assert_eq!(parse("18446744073709551615"), Value::Int(u64::MAX as i128));
        assert_eq!(parse("1.5"), Value::Number(1.5));
    }

    #[test]
    fn test_json_collections() {
        assert_eq!(
            parse("[1, 2]"),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            parse(r#"{"a": false}"#),
            Value::Dictionary(vec![(Value::String("a".into()), Value::Bool(false))])
        );
    }

    #[test]
    fn test_json_null_rejected() {
        assert!(json_to_value(&serde_json::Value::Null).is_err());
    }

    #[test]
    fn test_parse_args_reports_bad_json() {
        let err = parse_args(&["not json".to_string()]).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
