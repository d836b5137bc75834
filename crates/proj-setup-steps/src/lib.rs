//! # proj-setup-steps
//!
//! The setup steps behind the `proj-setup` commands:
//! - Git setup (`new`, `existing`, `none`)
//! - Virtual environment creation with uv / `python -m venv`
//! - Coding-assistant settings for opencode and claude
//! - Editor settings and pytest scaffolding
//! - Python package layout
//! - The `project-init` orchestrator chaining all of the above
//!
//! Every step takes an explicit [`StepContext`] and a fully specified
//! request value; none of them prompt or read the process environment.
//!
//! # Examples
//!
//! ```no_run
//! use proj_setup_steps::orchestrator::{project_init, InitFlags, InitPlan};
//! use proj_setup_steps::StepContext;
//! use proj_setup_core::types::GitMode;
//! use proj_setup_core::SetupConfig;
//! use camino::Utf8PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SetupConfig::default();
//! let ctx = StepContext::from_config(&config, Utf8PathBuf::from("/tmp"));
//! let flags = InitFlags {
//!     git: Some(GitMode::New),
//!     name: Some("my-project".to_string()),
//!     pytest: true,
//!     ..Default::default()
//! };
//! let plan = InitPlan::from_flags(&flags, &config.defaults.gitignore_template)?;
//! let report = project_init(&ctx, &plan).await?;
//! println!("{}", report.project_path);
//! # Ok(())
//! # }
//! ```

pub mod cli_config;
pub mod context;
pub mod files;
pub mod git;
pub mod ide;
pub mod layout;
pub mod orchestrator;
pub mod process;
pub mod venv;

pub use context::StepContext;
