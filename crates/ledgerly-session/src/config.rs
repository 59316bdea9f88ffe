//! Session configuration.

use serde::{Deserialize, Serialize};

/// Storage key the credential lives under unless configured otherwise.
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

/// Configuration for session behavior.
///
/// There is deliberately very little here: the session persists exactly one
/// value (the raw credential) and derives everything else from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// The storage key holding the raw bearer credential. It must be the
    /// same key the request augmentor reads.
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default_key() {
        assert_eq!(SessionConfig::default().token_key, "auth_token");
    }

    #[test]
    fn test_session_config_empty_json_uses_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }
}
