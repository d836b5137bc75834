//! Git setup step
//!
//! Produces a ready project directory in one of three modes:
//! - `none`: an empty directory
//! - `new`: a fresh repository with optional `.gitignore` / `README.md` and an initial commit
//! - `existing`: a clone of a remote repository
//!
//! Git availability is checked first in every mode, and an existing target
//! directory is always fatal; nothing is ever merged into it.
//!
//! # Examples
//!
//! ```no_run
//! use proj_setup_steps::git::{git_setup, GitRequest, NewRepo};
//! use proj_setup_steps::StepContext;
//! use proj_setup_core::SetupConfig;
//! use camino::Utf8PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = StepContext::from_config(&SetupConfig::default(), Utf8PathBuf::from("/tmp"));
//! let request = GitRequest::New(NewRepo {
//!     gitignore: Some("Python".to_string()),
//!     readme: true,
//!     ..NewRepo::named("my-project")
//! });
//! let outcome = git_setup(&ctx, &request).await?;
//! println!("{}", outcome.path);
//! # Ok(())
//! # }
//! ```

mod clone;
mod init;

pub use clone::{clone_existing, derive_target_folder};
pub use init::init_new_project;

use crate::context::StepContext;
use crate::process;
use camino::{Utf8Path, Utf8PathBuf};
use proj_setup_core::types::{GitMode, Visibility};
use proj_setup_core::{Error, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Options for `new` mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepo {
    /// Directory name, relative to the context's cwd
    pub name: String,
    /// README body line
    pub description: Option<String>,
    /// Recorded only; no hosted repository is created
    pub visibility: Visibility,
    /// Gitignore template name; `None` skips `.gitignore`
    pub gitignore: Option<String>,
    /// Write `README.md`
    pub readme: bool,
}

impl NewRepo {
    /// Private repository with no optional files
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            visibility: Visibility::Private,
            gitignore: None,
            readme: false,
        }
    }
}

/// Fully specified git step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRequest {
    /// Plain directory
    None { name: String },
    /// Fresh repository
    New(NewRepo),
    /// Clone of `url` into `target`, or a folder derived from the URL
    Existing { url: String, target: Option<String> },
}

impl GitRequest {
    pub fn mode(&self) -> GitMode {
        match self {
            Self::None { .. } => GitMode::None,
            Self::New(_) => GitMode::New,
            Self::Existing { .. } => GitMode::Existing,
        }
    }
}

/// Result of the git step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitOutcome {
    pub mode: GitMode,
    /// Absolute project path
    pub path: Utf8PathBuf,
}

/// Run the git step
pub async fn git_setup(ctx: &StepContext, request: &GitRequest) -> Result<GitOutcome> {
    check_git_available(ctx).await?;

    let path = match request {
        GitRequest::None { name } => {
            let path = ctx.resolve(require_name(name)?);
            create_project_directory(&path).await?;
            path
        }
        GitRequest::New(repo) => init_new_project(ctx, repo).await?,
        GitRequest::Existing { url, target } => {
            clone_existing(ctx, url, target.as_deref()).await?
        }
    };

    info!("Project directory ready at {}", path);
    Ok(GitOutcome {
        mode: request.mode(),
        path,
    })
}

/// Check that git runs
pub async fn check_git_available(ctx: &StepContext) -> Result<()> {
    if process::is_available(&ctx.git).await {
        Ok(())
    } else {
        Err(Error::tool_not_found("git"))
    }
}

/// Create `path`, failing if anything already exists there
pub async fn create_project_directory(path: &Utf8Path) -> Result<()> {
    if tokio::fs::try_exists(path).await? {
        return Err(Error::path_exists(path.as_str()));
    }

    debug!("Creating directory {}", path);
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

/// Stage everything and commit
///
/// With `allow_empty` the commit is created even when nothing is staged,
/// which happens when every file is ignored.
pub async fn commit_all(
    ctx: &StepContext,
    path: &Utf8Path,
    message: &str,
    allow_empty: bool,
) -> Result<()> {
    let envs: Vec<(&str, &str)> = ctx
        .identity
        .as_ref()
        .map(|identity| identity.env_vars().to_vec())
        .unwrap_or_default();

    let output = process::run(&ctx.git, ["add", "."], Some(path), &envs).await?;
    if !output.status.success() {
        return Err(Error::git_operation(format!(
            "git add failed: {}",
            process::failure_text(&output)
        )));
    }

    let mut args = vec!["commit", "-m", message];
    if allow_empty {
        args.push("--allow-empty");
    }
    let output = process::run(&ctx.git, &args, Some(path), &envs).await?;
    if !output.status.success() {
        return Err(Error::git_operation(format!(
            "git commit failed: {}",
            process::failure_text(&output)
        )));
    }

    info!("Committed '{}' in {}", message, path);
    Ok(())
}

fn require_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::missing_argument("project name"));
    }
    Ok(name)
}
