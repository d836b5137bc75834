//! Explicit environment handed to every setup step

use camino::{Utf8Path, Utf8PathBuf};
use proj_setup_core::types::GitIdentity;
use proj_setup_core::SetupConfig;

/// Everything a step would otherwise read from process-global state
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Base directory for relative project paths
    pub cwd: Utf8PathBuf,
    /// git binary
    pub git: String,
    /// uv binary
    pub uv: String,
    /// Python interpreter used for `-m venv`
    pub python: String,
    /// Identity exported to commit commands, if configured
    pub identity: Option<GitIdentity>,
    /// Message of the commit made by `git-setup --mode new`
    pub initial_commit_message: String,
    /// Message of the closing commit made by `project-init`
    pub setup_commit_message: String,
}

impl StepContext {
    /// Build a context from resolved configuration and a working directory
    pub fn from_config(config: &SetupConfig, cwd: Utf8PathBuf) -> Self {
        Self {
            cwd,
            git: config.tools.git.clone(),
            uv: config.tools.uv.clone(),
            python: config.tools.python_interpreter(),
            identity: config.git.identity(),
            initial_commit_message: config.git.initial_commit_message.clone(),
            setup_commit_message: config.git.setup_commit_message.clone(),
        }
    }

    /// Resolve a possibly relative path against `cwd`
    pub fn resolve(&self, path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else if path.as_str().is_empty() || path.as_str() == "." {
            self.cwd.clone()
        } else {
            self.cwd.join(path)
        }
    }

    pub fn with_identity(mut self, identity: GitIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_uv(mut self, uv: impl Into<String>) -> Self {
        self.uv = uv.into();
        self
    }
}
