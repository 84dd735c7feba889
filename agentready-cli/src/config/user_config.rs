//! User-level configuration for agentready
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/agentready/config.toml

use crate::ai::LlmBackend;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ai: AiSettings,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AiSettings {
    pub anthropic_api_key: Option<String>,

    pub openai_api_key: Option<String>,

    /// Model override for whichever backend is active
    pub model: Option<String>,

    /// anthropic (default), openai or ollama
    pub backend: Option<String>,

    /// Ollama URL (default: http://localhost:11434)
    pub ollama_url: Option<String>,

    pub ollama_model: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/agentready/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            match std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|content| Ok(toml::from_str::<UserConfig>(&content)?))
            {
                Ok(user_config) => config.merge(user_config),
                Err(e) => warn!("Ignoring {}: {:#}", path.display(), e),
            }
        }

        // Environment variables override everything
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            config.ai.anthropic_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.ai.openai_api_key = Some(key);
        }

        Ok(config)
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("agentready").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.ai.anthropic_api_key.is_some() {
            self.ai.anthropic_api_key = other.ai.anthropic_api_key;
        }
        if other.ai.openai_api_key.is_some() {
            self.ai.openai_api_key = other.ai.openai_api_key;
        }
        if other.ai.model.is_some() {
            self.ai.model = other.ai.model;
        }
        if other.ai.backend.is_some() {
            self.ai.backend = other.ai.backend;
        }
        if other.ai.ollama_url.is_some() {
            self.ai.ollama_url = other.ai.ollama_url;
        }
        if other.ai.ollama_model.is_some() {
            self.ai.ollama_model = other.ai.ollama_model;
        }
    }

    /// Configured backend name, if any
    pub fn backend(&self) -> Option<&str> {
        self.ai.backend.as_deref()
    }

    /// API key for a backend. Ollama never needs one.
    pub fn api_key(&self, backend: LlmBackend) -> Option<&str> {
        match backend {
            LlmBackend::Anthropic => self.ai.anthropic_api_key.as_deref(),
            LlmBackend::OpenAi => self.ai.openai_api_key.as_deref(),
            LlmBackend::Ollama => Some("ollama"),
        }
    }

    /// Model override for a backend
    pub fn model(&self, backend: LlmBackend) -> Option<&str> {
        match backend {
            LlmBackend::Ollama => self
                .ai
                .ollama_model
                .as_deref()
                .or(self.ai.model.as_deref()),
            _ => self.ai.model.as_deref(),
        }
    }

    /// Base URL override for a backend
    pub fn base_url(&self, backend: LlmBackend) -> Option<&str> {
        match backend {
            LlmBackend::Ollama => self.ai.ollama_url.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(config.backend().is_none());
        assert!(config.api_key(LlmBackend::Anthropic).is_none());
        assert_eq!(config.api_key(LlmBackend::Ollama), Some("ollama"));
        assert!(config.base_url(LlmBackend::Ollama).is_none());
    }

    #[test]
    fn test_toml_parsing_ollama_backend() {
        let toml_str = r#"
[ai]
backend = "ollama"
model = "ignored-for-ollama"
ollama_url = "http://gpu-box:11434"
ollama_model = "qwen2.5-coder"
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend(), Some("ollama"));
        assert_eq!(config.model(LlmBackend::Ollama), Some("qwen2.5-coder"));
        assert_eq!(config.model(LlmBackend::Anthropic), Some("ignored-for-ollama"));
        assert_eq!(
            config.base_url(LlmBackend::Ollama),
            Some("http://gpu-box:11434")
        );
        assert!(config.base_url(LlmBackend::OpenAi).is_none());
    }

    #[test]
    fn test_toml_parsing_keys() {
        let toml_str = r#"
[ai]
anthropic_api_key = "sk-ant-abc"
openai_api_key = "sk-openai"
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_key(LlmBackend::Anthropic), Some("sk-ant-abc"));
        assert_eq!(config.api_key(LlmBackend::OpenAi), Some("sk-openai"));
    }

    #[test]
    fn test_toml_parsing_minimal() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.backend().is_none());
    }

    #[test]
    fn test_invalid_toml_does_not_crash() {
        let bad_toml = "this is [[ not valid toml {{{}}}";
        assert!(toml::from_str::<UserConfig>(bad_toml).is_err());
    }

    #[test]
    fn test_merge_overrides_set_fields() {
        let mut base = UserConfig::default();
        let other = UserConfig {
            ai: AiSettings {
                anthropic_api_key: Some("sk-new".to_string()),
                openai_api_key: None,
                model: Some("claude-opus".to_string()),
                backend: Some("anthropic".to_string()),
                ollama_url: None,
                ollama_model: None,
            },
        };
        base.merge(other);
        assert_eq!(base.api_key(LlmBackend::Anthropic), Some("sk-new"));
        assert_eq!(base.model(LlmBackend::Anthropic), Some("claude-opus"));
        assert_eq!(base.backend(), Some("anthropic"));
    }

    #[test]
    fn test_merge_preserves_base_when_other_is_none() {
        let mut base = UserConfig {
            ai: AiSettings {
                openai_api_key: Some("sk-original".to_string()),
                ..Default::default()
            },
        };
        base.merge(UserConfig::default());
        assert_eq!(base.api_key(LlmBackend::OpenAi), Some("sk-original"));
    }

    #[test]
    fn test_user_config_path() {
        if let Some(p) = UserConfig::user_config_path() {
            assert!(p.ends_with("agentready/config.toml"));
        }
    }
}
