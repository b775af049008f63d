//! Environment configuration parsing and state wiring.

use std::collections::HashMap;
use std::time::Duration;

use quest::config::{AppConfig, BackendKind, DEFAULT_API_URL, DEFAULT_MODEL};
use quest::state::AppState;

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_defaults_when_unset() {
    let config = config_from(&[]);

    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.backend, BackendKind::Local);
    assert!(config.session_key.is_none());
    assert!(config.generation.api_key.is_none());
    assert_eq!(config.generation.api_url, DEFAULT_API_URL);
    assert_eq!(config.generation.model, DEFAULT_MODEL);
    assert_eq!(config.generation.max_tokens, 1000);
    assert_eq!(config.generation.timeout, Duration::from_secs(30));
    assert_eq!(config.chain.chain_id, 84531);
    assert!(config.chain.client_id.is_none());
    assert!(!config.chain.wallet_ready());
    assert_eq!(config.chain.network_label(), "Base Goerli (84531)");
}

#[test]
fn test_values_from_environment() {
    let config = config_from(&[
        ("CLAUDE_API_KEY", "sk-test"),
        ("CLAUDE_MODEL", "claude-test"),
        ("CLAUDE_MAX_TOKENS", "512"),
        ("GENERATION_TIMEOUT_SECS", "7"),
        ("THIRDWEB_CLIENT_ID", "client-1"),
        ("GOVERNANCE_CONTRACT_ADDRESS", "0xdead"),
        ("PROPOSAL_BACKEND", "chain"),
        ("BIND_ADDR", "0.0.0.0:9000"),
    ]);

    assert_eq!(config.generation.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.generation.model, "claude-test");
    assert_eq!(config.generation.max_tokens, 512);
    assert_eq!(config.generation.timeout, Duration::from_secs(7));
    assert_eq!(config.chain.client_id.as_deref(), Some("client-1"));
    assert_eq!(config.chain.contract_address.as_deref(), Some("0xdead"));
    assert!(config.chain.wallet_ready());
    assert_eq!(config.backend, BackendKind::Chain);
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
}

#[test]
fn test_invalid_values_fall_back() {
    let config = config_from(&[
        ("CLAUDE_MAX_TOKENS", "lots"),
        ("GENERATION_TIMEOUT_SECS", "-3"),
        ("PROPOSAL_BACKEND", "postgres"),
        ("CLAUDE_API_KEY", "   "),
    ]);

    assert_eq!(config.generation.max_tokens, 1000);
    assert_eq!(config.generation.timeout, Duration::from_secs(30));
    assert_eq!(config.backend, BackendKind::Local);
    assert!(config.generation.api_key.is_none(), "blank key counts as unset");
}

#[test]
fn test_zero_timeout_falls_back() {
    let config = config_from(&[("GENERATION_TIMEOUT_SECS", "0")]);
    assert_eq!(config.generation.timeout, Duration::from_secs(30));

    let config = config_from(&[("GENERATION_TIMEOUT_SECS", "1")]);
    assert_eq!(config.generation.timeout, Duration::from_secs(1));
}

#[tokio::test]
async fn test_state_wires_backend_from_config() {
    let local = AppState::from_config(config_from(&[]));
    assert_eq!(local.workspace.lock().await.backend_kind(), "local");

    let chain = AppState::from_config(config_from(&[("PROPOSAL_BACKEND", "chain")]));
    assert_eq!(chain.workspace.lock().await.backend_kind(), "chain");
}
