//! Virtual environment step
//!
//! Ensures `<project>/.venv` exists:
//! - absent: create it
//! - present and `Recreate`: delete it, then create it
//! - present and `Keep`: leave it alone and report where it is
//!
//! Creation prefers uv and falls back to `<python> -m venv` only when uv
//! is missing or fails. An explicitly requested provider is never
//! substituted. A missing provider fails the step before an existing
//! environment is deleted. After a successful creation `.venv/` is added to the
//! project's `.gitignore` once.

use crate::context::StepContext;
use crate::process;
use camino::{Utf8Path, Utf8PathBuf};
use proj_setup_core::types::{ProviderPreference, VenvProvider};
use proj_setup_core::{Error, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Environment directory name inside the project
pub const VENV_DIR: &str = ".venv";

const IGNORE_RULE: &str = ".venv/";

/// What to do when the environment already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingVenv {
    /// Delete and create again
    #[default]
    Recreate,
    /// Leave untouched
    Keep,
}

/// Fully specified venv step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvRequest {
    /// Project directory, relative to the context's cwd
    pub project_dir: Utf8PathBuf,
    pub provider: ProviderPreference,
    pub on_existing: ExistingVenv,
}

impl VenvRequest {
    pub fn new(project_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            provider: ProviderPreference::Auto,
            on_existing: ExistingVenv::Recreate,
        }
    }
}

/// What happened to the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "provider", rename_all = "lowercase")]
pub enum VenvStatus {
    Created(VenvProvider),
    Recreated(VenvProvider),
    Kept,
}

/// Result of the venv step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenvOutcome {
    /// Absolute environment path
    pub path: Utf8PathBuf,
    pub status: VenvStatus,
    /// Shell command that activates the environment
    pub activation: String,
}

/// Environment path for a project
pub fn venv_path(project: &Utf8Path) -> Utf8PathBuf {
    project.join(VENV_DIR)
}

/// Activation command for an environment at `venv`
pub fn activation_command(venv: &Utf8Path) -> String {
    if cfg!(windows) {
        venv.join("Scripts").join("activate.bat").to_string()
    } else {
        format!("source {}", venv.join("bin").join("activate"))
    }
}

/// Run the venv step
pub async fn venv_setup(ctx: &StepContext, request: &VenvRequest) -> Result<VenvOutcome> {
    let project = ctx.resolve(&request.project_dir);
    if !project.is_dir() {
        return Err(Error::path_not_found(project.as_str()));
    }

    let venv = venv_path(&project);
    let existed = venv.exists();

    if existed && request.on_existing == ExistingVenv::Keep {
        info!("Virtual environment already exists at: {}", venv);
        return Ok(VenvOutcome {
            activation: activation_command(&venv),
            path: venv,
            status: VenvStatus::Kept,
        });
    }

    // Settle the provider before anything is deleted
    let plan = plan_providers(ctx, request.provider).await?;

    if existed {
        info!("Removing existing virtual environment at {}", venv);
        tokio::fs::remove_dir_all(&venv).await?;
    }

    let provider = create_venv(ctx, &project, &venv, plan).await?;
    ensure_ignore_rule(&project).await?;

    info!("Virtual environment created at: {} ({})", venv, provider);
    Ok(VenvOutcome {
        activation: activation_command(&venv),
        path: venv,
        status: if existed {
            VenvStatus::Recreated(provider)
        } else {
            VenvStatus::Created(provider)
        },
    })
}

/// Providers to try, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderPlan {
    Only(VenvProvider),
    /// uv, then python if uv fails
    UvThenPython,
}

async fn plan_providers(
    ctx: &StepContext,
    preference: ProviderPreference,
) -> Result<ProviderPlan> {
    match preference {
        ProviderPreference::Uv => {
            if !process::is_available(&ctx.uv).await {
                return Err(Error::tool_not_found("uv"));
            }
            Ok(ProviderPlan::Only(VenvProvider::Uv))
        }
        ProviderPreference::Python => {
            if !process::is_available(&ctx.python).await {
                return Err(Error::tool_not_found(ctx.python.as_str()));
            }
            Ok(ProviderPlan::Only(VenvProvider::Python))
        }
        ProviderPreference::Auto => {
            if process::is_available(&ctx.uv).await {
                return Ok(ProviderPlan::UvThenPython);
            }
            debug!("uv not available, using {}", ctx.python);
            if !process::is_available(&ctx.python).await {
                return Err(Error::tool_not_found(ctx.python.as_str()));
            }
            Ok(ProviderPlan::Only(VenvProvider::Python))
        }
    }
}

async fn create_venv(
    ctx: &StepContext,
    project: &Utf8Path,
    venv: &Utf8Path,
    plan: ProviderPlan,
) -> Result<VenvProvider> {
    match plan {
        ProviderPlan::Only(provider) => {
            run_provider(ctx, provider, project, venv).await?;
            Ok(provider)
        }
        ProviderPlan::UvThenPython => {
            match run_provider(ctx, VenvProvider::Uv, project, venv).await {
                Ok(()) => return Ok(VenvProvider::Uv),
                Err(e) => warn!("uv failed, falling back to python: {}", e),
            }
            if !process::is_available(&ctx.python).await {
                return Err(Error::NoVenvProvider);
            }
            run_provider(ctx, VenvProvider::Python, project, venv).await?;
            Ok(VenvProvider::Python)
        }
    }
}

async fn run_provider(
    ctx: &StepContext,
    provider: VenvProvider,
    project: &Utf8Path,
    venv: &Utf8Path,
) -> Result<()> {
    let output = match provider {
        VenvProvider::Uv => {
            process::run(&ctx.uv, ["venv", venv.as_str()], Some(project), &[]).await?
        }
        VenvProvider::Python => {
            process::run(
                &ctx.python,
                ["-m", "venv", venv.as_str()],
                Some(project),
                &[],
            )
            .await?
        }
    };

    if !output.status.success() {
        return Err(Error::venv_creation(
            provider.as_str(),
            process::failure_text(&output),
        ));
    }
    Ok(())
}

/// Add `.venv/` to `<project>/.gitignore` unless an equivalent line is already there
///
/// Returns whether the file was changed.
pub async fn ensure_ignore_rule(project: &Utf8Path) -> Result<bool> {
    let gitignore = project.join(".gitignore");
    let content = if gitignore.exists() {
        tokio::fs::read_to_string(&gitignore).await?
    } else {
        String::new()
    };

    let present = content
        .lines()
        .map(str::trim)
        .any(|line| matches!(line, ".venv/" | ".venv" | ".venv\\"));
    if present {
        debug!("{} already ignores {}", gitignore, VENV_DIR);
        return Ok(false);
    }

    let mut updated = content;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(IGNORE_RULE);
    updated.push('\n');

    tokio::fs::write(&gitignore, updated).await?;
    debug!("Added {} to {}", IGNORE_RULE, gitignore);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::temp_context;

    /// Write an executable shell script that answers `--version` and runs `body` otherwise
    #[cfg(unix)]
    fn stub_tool(dir: &Utf8Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join(name);
        let content = format!(
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo '{name} 1.0'; exit 0; fi\n{body}\n"
        );
        std::fs::write(&script, content).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string()
    }

    /// Stand-in interpreter: `-m venv <dir>` creates the directory
    #[cfg(unix)]
    fn fake_python(dir: &Utf8Path) -> String {
        stub_tool(dir, "fake-python", "mkdir -p \"$3\"\ntouch \"$3/pyvenv.cfg\"")
    }

    /// Stand-in uv: `venv <dir>` creates the directory
    #[cfg(unix)]
    fn fake_uv(dir: &Utf8Path) -> String {
        stub_tool(dir, "fake-uv", "mkdir -p \"$2\"\ntouch \"$2/uv-made\"")
    }

    fn project(ctx: &StepContext, name: &str) -> Utf8PathBuf {
        let path = ctx.cwd.join(name);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_activation_command() {
        let venv = Utf8PathBuf::from("/p/.venv");
        let cmd = activation_command(&venv);
        if cfg!(windows) {
            assert!(cmd.ends_with("activate.bat"));
        } else {
            assert_eq!(cmd, "source /p/.venv/bin/activate");
        }
    }

    #[tokio::test]
    async fn test_missing_project_dir() {
        let (ctx, _temp) = temp_context();
        let err = venv_setup(&ctx, &VenvRequest::new("nope")).await.unwrap_err();
        assert!(matches!(err, Error::PathNotFound { .. }));
    }

    #[tokio::test]
    async fn test_keep_leaves_existing_venv_untouched() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");
        let venv = venv_path(&dir);
        std::fs::create_dir_all(&venv).unwrap();
        std::fs::write(venv.join("marker"), "v1").unwrap();
        let before = std::fs::metadata(venv.join("marker")).unwrap().modified().unwrap();

        let request = VenvRequest {
            on_existing: ExistingVenv::Keep,
            ..VenvRequest::new("proj")
        };
        // No provider is needed on this path
        let ctx = ctx.with_uv("proj-setup-no-uv").with_python("proj-setup-no-python");

        for _ in 0..2 {
            let outcome = venv_setup(&ctx, &request).await.unwrap();
            assert_eq!(outcome.status, VenvStatus::Kept);
            assert_eq!(outcome.path, venv);
        }

        let after = std::fs::metadata(venv.join("marker")).unwrap().modified().unwrap();
        assert_eq!(before, after);
        assert_eq!(std::fs::read_to_string(venv.join("marker")).unwrap(), "v1");
        assert!(!dir.join(".gitignore").exists());
    }

    #[tokio::test]
    async fn test_no_provider_available() {
        let (ctx, _temp) = temp_context();
        project(&ctx, "proj");
        let ctx = ctx.with_uv("proj-setup-no-uv").with_python("proj-setup-no-python");

        let err = venv_setup(&ctx, &VenvRequest::new("proj")).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn test_explicit_uv_missing_is_fatal() {
        let (ctx, _temp) = temp_context();
        project(&ctx, "proj");
        let ctx = ctx.with_uv("proj-setup-no-uv");

        let request = VenvRequest {
            provider: ProviderPreference::Uv,
            ..VenvRequest::new("proj")
        };
        let err = venv_setup(&ctx, &request).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool } if tool == "uv"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_auto_falls_back_to_python_and_recreates() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");
        let python = fake_python(&ctx.cwd);
        let ctx = ctx.with_uv("proj-setup-no-uv").with_python(python);

        let outcome = venv_setup(&ctx, &VenvRequest::new("proj")).await.unwrap();
        assert_eq!(outcome.status, VenvStatus::Created(VenvProvider::Python));
        assert!(outcome.path.join("pyvenv.cfg").exists());

        std::fs::write(outcome.path.join("stale"), "x").unwrap();
        let outcome = venv_setup(&ctx, &VenvRequest::new("proj")).await.unwrap();
        assert_eq!(outcome.status, VenvStatus::Recreated(VenvProvider::Python));
        assert!(!outcome.path.join("stale").exists());

        let gitignore = std::fs::read_to_string(dir.join(".gitignore")).unwrap();
        assert_eq!(gitignore.matches(".venv/").count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_uv_failure_falls_back_to_python() {
        let (ctx, _temp) = temp_context();
        project(&ctx, "proj");
        let python = fake_python(&ctx.cwd);
        // Passes the version check, fails to create
        let uv = stub_tool(&ctx.cwd, "broken-uv", "echo 'uv exploded' >&2\nexit 2");
        let ctx = ctx.with_uv(uv).with_python(python);

        let outcome = venv_setup(&ctx, &VenvRequest::new("proj")).await.unwrap();
        assert_eq!(outcome.status, VenvStatus::Created(VenvProvider::Python));

        // Explicit uv does not fall back
        let request = VenvRequest {
            provider: ProviderPreference::Uv,
            ..VenvRequest::new("proj")
        };
        let err = venv_setup(&ctx, &request).await.unwrap_err();
        match err {
            Error::VenvCreation { provider, message } => {
                assert_eq!(provider, "uv");
                assert_eq!(message, "uv exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_explicit_provider_keeps_existing_venv() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");
        let venv = venv_path(&dir);
        std::fs::create_dir_all(&venv).unwrap();
        std::fs::write(venv.join("marker"), "v1").unwrap();
        let ctx = ctx.with_uv("proj-setup-no-uv").with_python("proj-setup-no-python");

        for provider in [
            ProviderPreference::Uv,
            ProviderPreference::Python,
            ProviderPreference::Auto,
        ] {
            let request = VenvRequest {
                provider,
                ..VenvRequest::new("proj")
            };
            let err = venv_setup(&ctx, &request).await.unwrap_err();
            assert!(matches!(err, Error::ToolNotFound { .. }));
            assert_eq!(std::fs::read_to_string(venv.join("marker")).unwrap(), "v1");
        }
    }

    #[tokio::test]
    async fn test_explicit_python_missing_is_fatal() {
        let (ctx, _temp) = temp_context();
        project(&ctx, "proj");
        let ctx = ctx.with_python("proj-setup-no-python");

        let request = VenvRequest {
            provider: ProviderPreference::Python,
            ..VenvRequest::new("proj")
        };
        let err = venv_setup(&ctx, &request).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool } if tool == "proj-setup-no-python"));
        assert!(!ctx.cwd.join("proj/.venv").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_auto_prefers_uv() {
        let (ctx, _temp) = temp_context();
        project(&ctx, "proj");
        let uv = fake_uv(&ctx.cwd);
        let python = fake_python(&ctx.cwd);
        let ctx = ctx.with_uv(uv).with_python(python);

        let outcome = venv_setup(&ctx, &VenvRequest::new("proj")).await.unwrap();

        assert_eq!(outcome.status, VenvStatus::Created(VenvProvider::Uv));
        assert!(outcome.path.join("uv-made").exists());
        assert!(!outcome.path.join("pyvenv.cfg").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_explicit_python_ignores_available_uv() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");
        std::fs::create_dir_all(venv_path(&dir)).unwrap();
        let uv = fake_uv(&ctx.cwd);
        let python = fake_python(&ctx.cwd);
        let ctx = ctx.with_uv(uv).with_python(python);

        let request = VenvRequest {
            provider: ProviderPreference::Python,
            ..VenvRequest::new("proj")
        };
        let outcome = venv_setup(&ctx, &request).await.unwrap();

        assert_eq!(outcome.status, VenvStatus::Recreated(VenvProvider::Python));
        assert!(outcome.path.join("pyvenv.cfg").exists());
        assert!(!outcome.path.join("uv-made").exists());
    }

    #[tokio::test]
    async fn test_ignore_rule_added_once() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");

        assert!(ensure_ignore_rule(&dir).await.unwrap());
        assert!(!ensure_ignore_rule(&dir).await.unwrap());

        let content = std::fs::read_to_string(dir.join(".gitignore")).unwrap();
        assert_eq!(content, ".venv/\n");
    }

    #[tokio::test]
    async fn test_ignore_rule_appends_after_missing_newline() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");
        std::fs::write(dir.join(".gitignore"), "target/").unwrap();

        ensure_ignore_rule(&dir).await.unwrap();

        let content = std::fs::read_to_string(dir.join(".gitignore")).unwrap();
        assert_eq!(content, "target/\n.venv/\n");
    }

    #[tokio::test]
    async fn test_ignore_rule_respects_template_entry() {
        let (ctx, _temp) = temp_context();
        let dir = project(&ctx, "proj");
        let python_template = proj_setup_core::templates::gitignore_content("Python").unwrap();
        std::fs::write(dir.join(".gitignore"), &python_template).unwrap();

        assert!(!ensure_ignore_rule(&dir).await.unwrap());
        assert_eq!(
            std::fs::read_to_string(dir.join(".gitignore")).unwrap(),
            python_template
        );
    }
}
