//! Configuration types, defaults, loading, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Per-role agent endpoint configuration
    #[serde(default)]
    pub agents: AgentConfigs,

    /// Debate behaviour configuration
    #[serde(default)]
    pub debate: DebateSettings,

    /// Record storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The three agent endpoint configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfigs {
    #[serde(default)]
    pub positive: AgentConfig,

    #[serde(default)]
    pub negative: AgentConfig,

    /// Judge credentials fall back to the positive side's API key when unset.
    #[serde(default)]
    pub judge: AgentConfig,
}

impl AgentConfigs {
    /// Judge configuration with the credential fallback applied.
    pub fn resolved_judge(&self) -> AgentConfig {
        let mut judge = self.judge.clone();
        if judge.api_key.as_deref().unwrap_or("").is_empty() {
            judge.api_key = self.positive.api_key.clone();
        }
        judge
    }
}

/// One model endpoint: credential, optional base URL, optional model name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// API key (loaded from config.toml or environment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL override (defaults to the official OpenAI endpoint)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model identifier (defaults to the baseline model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Debate behaviour knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSettings {
    /// Maximum rebuttal rounds, 0 = unbounded (operator decides)
    #[serde(default)]
    pub max_rounds: u32,

    /// Pause for reading time between turns
    #[serde(default = "default_pacing")]
    pub pacing: bool,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            max_rounds: 0,
            pacing: default_pacing(),
        }
    }
}

fn default_pacing() -> bool {
    true
}

/// Where debate records land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for debate records (default: ~/.podium/debates)
    #[serde(default = "default_debates_dir")]
    pub debates_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            debates_dir: default_debates_dir(),
        }
    }
}

fn default_debates_dir() -> PathBuf {
    podium_home().join("debates")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Canonical base directory: `~/.podium/`
///
/// All Podium data lives here: config, debate records, logs.
pub fn podium_home() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let p = home.join(".podium");
    if !p.exists() {
        let _ = std::fs::create_dir_all(&p);
    }
    p
}

/// Expand leading `~` or `~/` in a path to the actual home directory.
fn expand_tilde(p: &Path) -> PathBuf {
    if let Ok(rest) = p.strip_prefix("~") {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest)
    } else {
        p.to_path_buf()
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.podium/config.toml
    /// 3. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        let system_config_path = Self::system_config_path();
        if system_config_path.exists() {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::merge_from_file(&system_config_path)?;
        }

        config = Self::apply_env_overrides(config);

        // TOML doesn't expand ~
        config.storage.debates_dir = expand_tilde(&config.storage.debates_dir);

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply environment
    /// overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }

        let mut config = Self::merge_from_file(path)?;
        config = Self::apply_env_overrides(config);
        config.storage.debates_dir = expand_tilde(&config.storage.debates_dir);
        Ok(config)
    }

    /// Get the system config path: ~/.podium/config.toml
    pub fn system_config_path() -> PathBuf {
        podium_home().join("config.toml")
    }

    /// Load configuration from a TOML file (serde defaults fill the gaps).
    fn merge_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let file_config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(file_config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Self) -> Self {
        Self::apply_overrides(config, |name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup. Factored out of
    /// [`Self::apply_env_overrides`] so the layer can be tested against a
    /// snapshot instead of mutating process-global env.
    fn apply_overrides(mut config: Self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Per-role agent settings, original env naming kept for compatibility
        let roles: [(&str, &mut AgentConfig); 3] = [
            ("POSITIVE", &mut config.agents.positive),
            ("NEGATIVE", &mut config.agents.negative),
            ("JUDGE", &mut config.agents.judge),
        ];
        for (suffix, agent) in roles {
            if let Some(key) = var(&format!("OPENAI_API_KEY_{suffix}")) {
                agent.api_key = Some(key);
            }
            if let Some(base) = var(&format!("OPENAI_API_BASE_{suffix}")) {
                agent.base_url = Some(base);
            }
            if let Some(model) = var(&format!("OPENAI_MODEL_{suffix}")) {
                agent.model = Some(model);
            }
        }

        if let Some(level) = var("PODIUM_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(dir) = var("PODIUM_DEBATES_DIR") {
            config.storage.debates_dir = PathBuf::from(dir);
        }
        if let Some(rounds) = var("PODIUM_MAX_ROUNDS") {
            config.debate.max_rounds = rounds.parse().unwrap_or(0);
        }
        if let Some(pacing) = var("PODIUM_PACING") {
            config.debate.pacing = pacing.parse().unwrap_or(true);
        }

        config
    }

    /// Resolved configuration as TOML with API keys redacted, for
    /// `podium config`.
    pub fn redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        for agent in [
            &mut shown.agents.positive,
            &mut shown.agents.negative,
            &mut shown.agents.judge,
        ] {
            if agent.api_key.is_some() {
                agent.api_key = Some("***".to_string());
            }
        }
        toml::to_string_pretty(&shown).context("Failed to render config")
    }
}
