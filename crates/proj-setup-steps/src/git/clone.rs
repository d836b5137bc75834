//! `existing` mode: clone a remote repository

use crate::context::StepContext;
use crate::process;
use camino::Utf8PathBuf;
use proj_setup_core::{Error, Result};
use tracing::{debug, info};
use url::Url;

/// Clone `url` into `target` (relative to cwd), or into a folder named after the repository
///
/// # Errors
/// - `MissingArgument` when `url` is empty
/// - `InvalidRepoUrl` when no folder name can be derived
/// - `PathExists` when the target is already there
/// - `CloneFailed` with git's stderr when the clone fails
pub async fn clone_existing(
    ctx: &StepContext,
    url: &str,
    target: Option<&str>,
) -> Result<Utf8PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::missing_argument("--url"));
    }

    let folder = match target.map(str::trim).filter(|t| !t.is_empty()) {
        Some(target) => target.to_string(),
        None => derive_target_folder(url)?,
    };
    let target_path = ctx.resolve(&folder);

    if tokio::fs::try_exists(&target_path).await? {
        return Err(Error::path_exists(target_path.as_str()));
    }

    info!("Cloning repository: {} -> {}", url, target_path);
    let output = process::run(
        &ctx.git,
        ["clone", url, target_path.as_str()],
        Some(&ctx.cwd),
        &[],
    )
    .await?;

    if !output.status.success() {
        return Err(Error::clone_failed(process::failure_text(&output)));
    }

    info!("Repository cloned successfully");
    Ok(target_path)
}

/// Folder name for a clone: the URL's last path segment without a trailing `.git`
///
/// # Examples
/// - `https://github.com/foo/bar.git` -> `bar`
/// - `https://github.com/foo/bar` -> `bar`
/// - `git@github.com:foo/bar.git` -> `bar`
pub fn derive_target_folder(url: &str) -> Result<String> {
    let trimmed = url.trim();

    let last_segment = match Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() || parsed.scheme() == "file" => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        _ => {
            // scp-like (`user@host:path`) or a plain filesystem path
            debug!("Treating '{}' as an scp-style or local path", trimmed);
            trimmed
                .split(['/', ':', '\\'])
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        }
    };

    let name = last_segment
        .map(|s| s.strip_suffix(".git").map(str::to_string).unwrap_or(s))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::invalid_repo_url(url))?;

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{commit_count, temp_context};
    use super::super::{init_new_project, NewRepo};
    use super::*;

    #[test]
    fn test_derive_strips_git_suffix() {
        assert_eq!(
            derive_target_folder("https://github.com/foo/bar.git").unwrap(),
            "bar"
        );
        assert_eq!(
            derive_target_folder("https://github.com/foo/bar").unwrap(),
            "bar"
        );
        assert_eq!(
            derive_target_folder("https://github.com/foo/bar/").unwrap(),
            "bar"
        );
    }

    #[test]
    fn test_derive_scp_and_local_paths() {
        assert_eq!(
            derive_target_folder("git@github.com:user/my-project.git").unwrap(),
            "my-project"
        );
        assert_eq!(derive_target_folder("git@host:solo.git").unwrap(), "solo");
        assert_eq!(derive_target_folder("/srv/repos/tool.git").unwrap(), "tool");
        assert_eq!(
            derive_target_folder("file:///srv/repos/tool.git").unwrap(),
            "tool"
        );
    }

    #[test]
    fn test_derive_strips_only_one_suffix() {
        assert_eq!(
            derive_target_folder("https://example.com/a/b.git.git").unwrap(),
            "b.git"
        );
    }

    #[test]
    fn test_derive_without_path_fails() {
        assert!(derive_target_folder("https://github.com/").is_err());
        assert!(derive_target_folder("https://github.com/.git").is_err());
        assert!(derive_target_folder("").is_err());
    }

    #[tokio::test]
    async fn test_empty_url_is_missing_argument() {
        let (ctx, _temp) = temp_context();
        let err = clone_existing(&ctx, " ", None).await.unwrap_err();
        assert!(matches!(err, Error::MissingArgument { .. }));
    }

    #[tokio::test]
    async fn test_clone_local_repository() {
        let (ctx, _temp) = temp_context();
        let source = init_new_project(
            &ctx,
            &NewRepo {
                readme: true,
                ..NewRepo::named("upstream")
            },
        )
        .await
        .unwrap();

        let cloned = clone_existing(&ctx, source.as_str(), Some("copy"))
            .await
            .unwrap();

        assert_eq!(cloned, ctx.cwd.join("copy"));
        assert!(cloned.join(".git").exists());
        assert!(cloned.join("README.md").exists());
        assert_eq!(commit_count(&cloned).await, 1);
    }

    #[tokio::test]
    async fn test_clone_into_derived_folder_collision() {
        let (ctx, _temp) = temp_context();
        std::fs::create_dir_all(ctx.cwd.join("bar")).unwrap();

        let err = clone_existing(&ctx, "https://example.invalid/foo/bar.git", None)
            .await
            .unwrap_err();

        assert!(err.is_collision());
    }

    #[tokio::test]
    async fn test_clone_failure_carries_git_stderr() {
        let (ctx, _temp) = temp_context();
        let missing = ctx.cwd.join("does-not-exist.git");

        let err = clone_existing(&ctx, missing.as_str(), None)
            .await
            .unwrap_err();

        match err {
            Error::CloneFailed { message } => assert!(!message.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!ctx.cwd.join("does-not-exist").exists());
    }
}
