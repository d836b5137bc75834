//! Full project initialization
//!
//! Runs the steps in a fixed order against one project directory:
//!
//! 1. git setup
//! 2. virtual environment (optional)
//! 3. coding-assistant settings
//! 4. editor settings
//! 5. pytest scaffold (optional)
//! 6. commit of everything above, unless the mode is `none`
//!
//! The first failing step stops the run. A failing final commit only
//! produces a warning, since the project exists by then.

use crate::cli_config::{cli_config, CliConfigRequest};
use crate::context::StepContext;
use crate::git::{commit_all, git_setup, GitRequest, NewRepo};
use crate::ide::{scaffold_pytest, write_ide_config};
use crate::venv::{venv_setup, ExistingVenv, VenvOutcome, VenvRequest};
use camino::Utf8PathBuf;
use proj_setup_core::types::{
    CliTool, GitMode, ProviderPreference, ServerMode, Visibility, Workflow,
};
use proj_setup_core::{Error, Result};
use serde::Serialize;
use std::future::Future;
use tracing::{debug, info};

/// Assistant tool choices for the cli-config step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CliSelection {
    pub workflow: Workflow,
    pub cli: CliTool,
    pub server: ServerMode,
    pub include_handoff: bool,
}

/// Fully specified orchestrator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitPlan {
    pub git: GitRequest,
    pub create_venv: bool,
    pub cli: CliSelection,
    pub pytest: bool,
}

/// Non-interactive `project-init` flags as given on the command line
///
/// Paired booleans (`venv`/`no_venv`, `pytest`/`no_pytest`,
/// `public`/`private`) record presence only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitFlags {
    pub git: Option<GitMode>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub public: bool,
    pub private: bool,
    pub venv: bool,
    pub no_venv: bool,
    pub cli: Option<CliTool>,
    pub server: Option<ServerMode>,
    pub workflow: Option<Workflow>,
    pub pytest: bool,
    pub no_pytest: bool,
}

/// Resolve a positive/negative flag pair: positive wins, then negative, then the default
fn flag_pair(positive: bool, negative: bool, default: bool) -> bool {
    if positive {
        true
    } else if negative {
        false
    } else {
        default
    }
}

impl InitPlan {
    /// Build a plan from flags
    ///
    /// `gitignore_template` is used for `new` mode, which always writes
    /// `.gitignore` and `README.md` when driven by flags. In `none` mode the
    /// venv and pytest steps are switched off and the tool selection is
    /// fixed to both tools with the assisted workflow, whatever else was passed.
    pub fn from_flags(flags: &InitFlags, gitignore_template: &str) -> Result<Self> {
        let mode = flags.git.unwrap_or(GitMode::New);
        let name = flags
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let git = match mode {
            GitMode::New => GitRequest::New(NewRepo {
                name: name.ok_or_else(|| Error::missing_argument("--name"))?,
                description: None,
                visibility: if flags.private || !flags.public {
                    Visibility::Private
                } else {
                    Visibility::Public
                },
                gitignore: Some(gitignore_template.to_string()),
                readme: true,
            }),
            GitMode::Existing => GitRequest::Existing {
                url: flags
                    .url
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| Error::missing_argument("--url"))?,
                target: name,
            },
            GitMode::None => GitRequest::None {
                name: name.ok_or_else(|| Error::missing_argument("--name"))?,
            },
        };

        let mut plan = Self {
            git,
            create_venv: flag_pair(flags.venv, flags.no_venv, true),
            cli: CliSelection {
                workflow: flags.workflow.unwrap_or_default(),
                cli: flags.cli.unwrap_or_default(),
                server: flags.server.unwrap_or_default(),
                include_handoff: false,
            },
            pytest: flag_pair(flags.pytest, flags.no_pytest, false),
        };

        if mode == GitMode::None {
            plan.create_venv = false;
            plan.pytest = false;
            plan.cli.cli = CliTool::Both;
            plan.cli.workflow = Workflow::Assisted;
        }

        Ok(plan)
    }
}

/// Summary of a completed initialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub project_path: Utf8PathBuf,
    pub git_mode: GitMode,
    pub venv: Option<VenvOutcome>,
    /// Settings, editor and test files written after the git step
    pub files: Vec<Utf8PathBuf>,
    /// Whether the closing commit was made
    pub committed: bool,
    pub warnings: Vec<String>,
}

async fn step<T>(name: &str, fut: impl Future<Output = Result<T>>) -> Result<T> {
    info!("--- {} ---", name);
    fut.await.map_err(|e| Error::step_failed(name, e))
}

/// Run every step of `plan`
pub async fn project_init(ctx: &StepContext, plan: &InitPlan) -> Result<InitReport> {
    let git = step("Git setup", git_setup(ctx, &plan.git)).await?;
    let project = git.path;

    let venv = if plan.create_venv {
        let request = VenvRequest {
            project_dir: project.clone(),
            provider: ProviderPreference::Auto,
            on_existing: ExistingVenv::Recreate,
        };
        Some(step("Virtual environment", venv_setup(ctx, &request)).await?)
    } else {
        None
    };

    let cli_request = CliConfigRequest {
        project_dir: project.clone(),
        workflow: plan.cli.workflow,
        cli: plan.cli.cli,
        server: plan.cli.server,
        include_init_script: false,
        include_handoff: plan.cli.include_handoff,
    };
    let mut files = step("CLI configuration", cli_config(ctx, &cli_request))
        .await?
        .written;

    files.extend(step("IDE configuration", write_ide_config(&project)).await?);

    if plan.pytest {
        files.extend(step("Testing setup", scaffold_pytest(&project)).await?);
    }

    let mut warnings = Vec::new();
    let mut committed = false;
    if git.mode.uses_git() {
        info!("--- Git commit ---");
        match commit_all(ctx, &project, &ctx.setup_commit_message, false).await {
            Ok(()) => committed = true,
            Err(e) => {
                debug!("Git commit failed: {}", e);
                warnings.push(format!("Git commit failed: {}", e));
            }
        }
    }

    info!("Project initialization complete: {}", project);
    Ok(InitReport {
        project_path: project,
        git_mode: git.mode,
        venv,
        files,
        committed,
        warnings,
    })
}
