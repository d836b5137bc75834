//! Core types for project setup

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Declares a closed set of lowercase choices with `as_str`, `all`,
/// `Display` and `FromStr` (case-insensitive, `Error::InvalidChoice` otherwise).
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Get all choices
            pub fn all() -> Vec<Self> {
                vec![$(Self::$variant),+]
            }

            /// Get the string representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            /// Human-readable list of accepted values
            pub fn expected() -> String {
                let names: Vec<&str> = Self::all().iter().map(|c| c.as_str()).collect();
                match names.split_last() {
                    Some((last, [only])) => format!("{} or {}", only, last),
                    Some((last, rest)) if !rest.is_empty() => {
                        format!("{}, or {}", rest.join(", "), last)
                    }
                    _ => names.join(""),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                Self::all()
                    .into_iter()
                    .find(|c| c.as_str() == lower)
                    .ok_or_else(|| Error::invalid_choice($kind, s, Self::expected()))
            }
        }
    };
}

choice_enum! {
    /// How the project directory comes into being
    GitMode, "mode" {
        /// Fresh directory with `git init` and an initial commit
        New => "new",
        /// Clone of a remote repository
        Existing => "existing",
        /// Plain directory without version control
        None => "none",
    }
}

impl GitMode {
    /// Whether the mode leaves a repository behind that can be committed to
    pub fn uses_git(&self) -> bool {
        !matches!(self, Self::None)
    }
}

choice_enum! {
    /// Repository visibility
    ///
    /// Collected for parity with hosted-repository workflows; no remote is
    /// created, so the value is only logged.
    Visibility, "visibility" {
        Public => "public",
        Private => "private",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Private
    }
}

choice_enum! {
    /// Workflow classification recorded in tool settings
    Workflow, "workflow" {
        /// The tool acts autonomously
        Agentic => "agentic",
        /// The tool assists a human driver
        Assisted => "assisted",
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::Assisted
    }
}

choice_enum! {
    /// Deployment mode recorded in the opencode settings
    ServerMode, "server mode" {
        Local => "local",
        Server => "server",
    }
}

impl Default for ServerMode {
    fn default() -> Self {
        Self::Local
    }
}

choice_enum! {
    /// Which CLI tool integrations to configure
    CliTool, "CLI tool" {
        Opencode => "opencode",
        Claude => "claude",
        Both => "both",
    }
}

impl CliTool {
    pub fn includes_opencode(&self) -> bool {
        matches!(self, Self::Opencode | Self::Both)
    }

    pub fn includes_claude(&self) -> bool {
        matches!(self, Self::Claude | Self::Both)
    }
}

impl Default for CliTool {
    fn default() -> Self {
        Self::Both
    }
}

choice_enum! {
    /// Virtual environment creator
    VenvProvider, "venv provider" {
        /// `uv venv`
        Uv => "uv",
        /// `<python> -m venv`
        Python => "python",
    }
}

choice_enum! {
    /// Provider selection policy
    ProviderPreference, "provider preference" {
        /// Prefer uv, fall back to python when uv fails
        Auto => "auto",
        /// uv only; fatal when missing
        Uv => "uv",
        /// python only; fatal when missing
        Python => "python",
    }
}

impl Default for ProviderPreference {
    fn default() -> Self {
        Self::Auto
    }
}

choice_enum! {
    /// Package layout for a freshly scaffolded Python project
    Layout, "structure type" {
        /// `__init__.py` at the project root
        Flat => "flat",
        /// `src/__init__.py`
        Src => "src",
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Src
    }
}

/// Commit author identity applied to git commits made by the tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

impl GitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Environment variables that make git use this identity for one command
    pub fn env_vars(&self) -> [(&'static str, &str); 4] {
        [
            ("GIT_AUTHOR_NAME", self.name.as_str()),
            ("GIT_AUTHOR_EMAIL", self.email.as_str()),
            ("GIT_COMMITTER_NAME", self.name.as_str()),
            ("GIT_COMMITTER_EMAIL", self.email.as_str()),
        ]
    }
}
