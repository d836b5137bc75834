//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.proj-setup/config.yaml, or an explicit file)
//! 3. Environment variables (PROJ_SETUP_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::GitIdentity;
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// Resolved tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SetupConfig {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub git: GitSettings,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// External binaries invoked by the setup steps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolsConfig {
    #[serde(default = "default_git")]
    pub git: String,

    #[serde(default = "default_uv")]
    pub uv: String,

    /// Interpreter used for `-m venv`; resolved from PATH when unset
    #[serde(default)]
    pub python: Option<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: default_git(),
            uv: default_uv(),
            python: None,
        }
    }
}

impl ToolsConfig {
    /// The interpreter to run: the configured one, else `python3`/`python` from PATH
    pub fn python_interpreter(&self) -> String {
        if let Some(python) = self.python.as_deref().filter(|p| !p.is_empty()) {
            return python.to_string();
        }

        ["python3", "python"]
            .iter()
            .find_map(|name| which::which(name).ok())
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|| {
                if cfg!(windows) {
                    "python".to_string()
                } else {
                    "python3".to_string()
                }
            })
    }
}

/// Commit settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitSettings {
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,

    #[serde(default = "default_setup_commit_message")]
    pub setup_commit_message: String,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub user_email: Option<String>,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            initial_commit_message: default_initial_commit_message(),
            setup_commit_message: default_setup_commit_message(),
            user_name: None,
            user_email: None,
        }
    }
}

impl GitSettings {
    /// Commit identity, only when both name and email are configured
    pub fn identity(&self) -> Option<GitIdentity> {
        match (self.user_name.as_deref(), self.user_email.as_deref()) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(GitIdentity::new(name, email))
            }
            _ => None,
        }
    }
}

/// Defaults for values not supplied on the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DefaultsConfig {
    #[serde(default = "default_gitignore_template")]
    pub gitignore_template: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            gitignore_template: default_gitignore_template(),
        }
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn default_uv() -> String {
    "uv".to_string()
}

fn default_initial_commit_message() -> String {
    "Initial commit".to_string()
}

fn default_setup_commit_message() -> String {
    "Initial project setup".to_string()
}

fn default_gitignore_template() -> String {
    "Python".to_string()
}

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Directory holding the user config file
    config_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at ~/.proj-setup
    pub fn new() -> Result<Self> {
        let home = get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {:?}", p)))?;
        Ok(Self {
            config_dir: home.join(".proj-setup"),
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Load defaults, the user config file if present, then environment overrides
    pub fn load(&self) -> Result<SetupConfig> {
        let user_file = self.config_dir.join(USER_CONFIG_FILE);
        let overlay = if user_file.exists() {
            Some(Self::load_yaml_value(&user_file)?)
        } else {
            None
        };
        Self::resolve(overlay)
    }

    /// Load defaults, an explicit config file (which must exist), then environment overrides
    pub fn load_file(&self, path: &Utf8Path) -> Result<SetupConfig> {
        if !path.exists() {
            return Err(Error::invalid_config(format!(
                "Config file not found: {}",
                path
            )));
        }
        Self::resolve(Some(Self::load_yaml_value(path)?))
    }

    fn resolve(overlay: Option<Value>) -> Result<SetupConfig> {
        let mut merged = Self::load_embedded_defaults()?;
        if let Some(overlay) = overlay {
            merge_values(&mut merged, overlay);
        }

        let config: SetupConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to parse configuration: {}", e)))?;

        Ok(apply_env_overrides(config, |key| env::var(key).ok()))
    }

    fn load_embedded_defaults() -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::invalid_config(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        Ok(serde_yaml_ng::from_str(content)?)
    }

    fn load_yaml_value(path: &Utf8Path) -> Result<Value> {
        debug!("Loading configuration from {}", path);
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

/// Apply PROJ_SETUP_* overrides read through `lookup`
pub fn apply_env_overrides<F>(mut config: SetupConfig, lookup: F) -> SetupConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(val) = get("PROJ_SETUP_GIT") {
        config.tools.git = val;
    }
    if let Some(val) = get("PROJ_SETUP_UV") {
        config.tools.uv = val;
    }
    if let Some(val) = get("PROJ_SETUP_PYTHON") {
        config.tools.python = Some(val);
    }
    if let Some(val) = get("PROJ_SETUP_GIT_USER_NAME") {
        config.git.user_name = Some(val);
    }
    if let Some(val) = get("PROJ_SETUP_GIT_USER_EMAIL") {
        config.git.user_email = Some(val);
    }
    if let Some(val) = get("PROJ_SETUP_GITIGNORE_TEMPLATE") {
        config.defaults.gitignore_template = val;
    }

    config
}
