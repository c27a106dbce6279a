//! Client factory.
//!
//! Builds one streaming client per configured agent. Creation fails fast with
//! an actionable message when a credential is missing, before any debate
//! starts.

use super::r#trait::CompletionClient;
use super::openai::OpenAiClient;
use crate::config::AgentConfig;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Create a completion client for one agent role.
pub fn create_client(role_name: &str, agent: &AgentConfig) -> Result<Arc<dyn CompletionClient>> {
    let api_key = agent
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .with_context(|| {
            format!(
                "No API key configured for the {role_name} agent. \
                 Set OPENAI_API_KEY_{} or [agents.{role_name}] api_key in config.toml",
                role_name.to_uppercase()
            )
        })?;

    let client = OpenAiClient::new(api_key, agent.base_url.clone(), agent.model.clone());
    tracing::info!("{} agent: model={}", role_name, client.model());
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_an_error_naming_the_role() {
        let err = create_client("judge", &AgentConfig::default()).unwrap_err();
        assert!(err.to_string().contains("judge"));
        assert!(err.to_string().contains("OPENAI_API_KEY_JUDGE"));
    }

    #[test]
    fn blank_key_is_rejected() {
        let agent = AgentConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(create_client("positive", &agent).is_err());
    }

    #[test]
    fn configured_agent_builds() {
        let agent = AgentConfig {
            api_key: Some("sk-test".to_string()),
            base_url: Some("http://localhost:1234/v1".to_string()),
            model: Some("local-model".to_string()),
        };
        assert!(create_client("negative", &agent).is_ok());
    }
}
