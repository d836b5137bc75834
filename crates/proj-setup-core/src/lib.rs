//! # proj-setup-core
//!
//! Core library for proj-setup providing:
//! - Hierarchical configuration (embedded defaults, user file, environment)
//! - The error taxonomy shared by every setup step
//! - Closed-set domain types (git mode, workflow, server mode, ...)
//! - Embedded file templates (gitignore presets, editor and pytest files)

pub mod config;
pub mod error;
pub mod templates;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, SetupConfig};
pub use error::{Error, Result};
pub use templates::GitignoreTemplate;
