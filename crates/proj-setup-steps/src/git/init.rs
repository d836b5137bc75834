//! `new` mode: fresh repository with optional starter files

use super::{commit_all, create_project_directory, require_name, NewRepo};
use crate::context::StepContext;
use crate::process;
use camino::Utf8PathBuf;
use proj_setup_core::templates::{gitignore_content, render_readme};
use proj_setup_core::{Error, Result};
use tracing::{debug, info};

/// Create the directory, `git init`, write optional files, and commit
///
/// # Errors
/// - `PathExists` when the directory is already there
/// - `GitOperation` when init, add, or commit fails (stderr included)
pub async fn init_new_project(ctx: &StepContext, repo: &NewRepo) -> Result<Utf8PathBuf> {
    let name = require_name(&repo.name)?;
    let path = ctx.resolve(name);

    info!("Initializing git repository at: {}", path);
    debug!("Repository visibility: {}", repo.visibility);

    create_project_directory(&path).await?;

    let output = process::run(&ctx.git, ["init"], Some(&path), &[]).await?;
    if !output.status.success() {
        return Err(Error::git_operation(format!(
            "git init failed: {}",
            process::failure_text(&output)
        )));
    }

    if let Some(template) = &repo.gitignore {
        let content = gitignore_content(template)?;
        tokio::fs::write(path.join(".gitignore"), content).await?;
        debug!("Wrote .gitignore from template {}", template);
    }

    if repo.readme {
        let content = render_readme(name, repo.description.as_deref())?;
        tokio::fs::write(path.join("README.md"), content).await?;
        debug!("Wrote README.md");
    }

    commit_all(ctx, &path, &ctx.initial_commit_message, true).await?;

    info!("Repository initialized successfully");
    Ok(path)
}
