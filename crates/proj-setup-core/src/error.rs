//! Error types for proj-setup

use thiserror::Error;

/// Result type alias using proj-setup-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project setup error types
///
/// Variants fall into four groups: preconditions (a missing tool or an
/// invalid choice), collisions (the target path already exists), delegated
/// process failures (an external tool exited non-zero; its stderr is carried
/// verbatim), and orchestration wrappers.
#[derive(Error, Debug)]
pub enum Error {
    /// Required external tool is missing or not runnable
    #[error("{tool} is not installed or not in PATH")]
    ToolNotFound { tool: String },

    /// Neither virtual environment provider could be used
    #[error("Neither uv nor python is available")]
    NoVenvProvider,

    /// Value outside a closed set of choices
    #[error("Invalid {kind} '{value}'. Use {expected}.")]
    InvalidChoice {
        kind: String,
        value: String,
        expected: String,
    },

    /// Required argument not supplied in non-interactive mode
    #[error("{argument} is required in non-interactive mode")]
    MissingArgument { argument: String },

    /// Target path already exists
    #[error("Directory '{path}' already exists")]
    PathExists { path: String },

    /// Path expected to exist is missing
    #[error("Directory '{path}' does not exist")]
    PathNotFound { path: String },

    /// Repository URL from which no folder name can be derived
    #[error("Could not determine target folder name from URL: {url}")]
    InvalidRepoUrl { url: String },

    /// Git init/add/commit failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git clone failed
    #[error("Error cloning repository: {message}")]
    CloneFailed { message: String },

    /// Virtual environment creation failed
    #[error("Error creating venv with {provider}: {message}")]
    VenvCreation { provider: String, message: String },

    /// A step of the init sequence failed
    #[error("{step} failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<Error>,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template error from Tera
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tool not found error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create an invalid choice error
    pub fn invalid_choice(
        kind: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidChoice {
            kind: kind.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
        }
    }

    /// Create a path exists error
    pub fn path_exists(path: impl Into<String>) -> Self {
        Self::PathExists { path: path.into() }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create an invalid repo URL error
    pub fn invalid_repo_url(url: impl Into<String>) -> Self {
        Self::InvalidRepoUrl { url: url.into() }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create a venv creation error
    pub fn venv_creation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::VenvCreation {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Wrap an error with the name of the step that produced it
    pub fn step_failed(step: impl Into<String>, source: Error) -> Self {
        Self::StepFailed {
            step: step.into(),
            source: Box::new(source),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for failures caused by an existing target path
    pub fn is_collision(&self) -> bool {
        match self {
            Self::PathExists { .. } => true,
            Self::StepFailed { source, .. } => source.is_collision(),
            _ => false,
        }
    }
}
