use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Base Goerli, the chain the wallet provider targets.
pub const DEFAULT_CHAIN_NAME: &str = "base-goerli";
pub const DEFAULT_CHAIN_ID: u64 = 84531;

/// Which proposal backend the workspace appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Chain,
}

/// Settings for the text-generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// `None` disables generation; submissions go through as typed.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Wallet/chain provider context.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain_name: String,
    pub chain_id: u64,
    pub client_id: Option<String>,
    pub contract_address: Option<String>,
}

impl ChainConfig {
    /// "Base Goerli (84531)" style label for the page footer.
    pub fn network_label(&self) -> String {
        let name = self
            .chain_name
            .split('-')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} ({})", name, self.chain_id)
    }

    /// A wallet connection needs a client id; without one the provider is inert.
    pub fn wallet_ready(&self) -> bool {
        self.client_id.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub backend: BackendKind,
    pub generation: GenerationConfig,
    pub chain: ChainConfig,
}

impl AppConfig {
    /// Read configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend = match get("PROPOSAL_BACKEND").as_deref() {
            None | Some("local") => BackendKind::Local,
            Some("chain") => BackendKind::Chain,
            Some(other) => {
                log::warn!("Unknown PROPOSAL_BACKEND '{other}', using local backend");
                BackendKind::Local
            }
        };

        let generation = GenerationConfig {
            api_key: get("CLAUDE_API_KEY"),
            api_url: get("CLAUDE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: get("CLAUDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: parse_or(get("CLAUDE_MAX_TOKENS"), "CLAUDE_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            timeout: Duration::from_secs(timeout_secs(get("GENERATION_TIMEOUT_SECS"))),
        };

        let chain = ChainConfig {
            chain_name: DEFAULT_CHAIN_NAME.to_string(),
            chain_id: parse_or(get("CHAIN_ID"), "CHAIN_ID", DEFAULT_CHAIN_ID),
            client_id: get("THIRDWEB_CLIENT_ID"),
            contract_address: get("GOVERNANCE_CONTRACT_ADDRESS"),
        };

        AppConfig {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: get("SESSION_KEY"),
            backend,
            generation,
            chain,
        }
    }
}

/// A zero timeout would fail every generation call, so it counts as invalid.
fn timeout_secs(raw: Option<String>) -> u64 {
    match parse_or(raw, "GENERATION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS) {
        0 => {
            log::warn!(
                "GENERATION_TIMEOUT_SECS must be positive, falling back to {DEFAULT_TIMEOUT_SECS}"
            );
            DEFAULT_TIMEOUT_SECS
        }
        secs => secs,
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match raw {
        None => default,
        Some(val) => match val.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::warn!("Invalid {key} value '{val}', falling back to {default}");
                default
            }
        },
    }
}
