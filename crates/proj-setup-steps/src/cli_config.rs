//! Coding-assistant settings step
//!
//! Writes `.opencode/settings.json` and/or `.claude/settings.json` for the
//! selected tools. Every run replaces the previous files.

use crate::context::StepContext;
use crate::files::{require_dir, write_file, write_json};
use camino::Utf8PathBuf;
use proj_setup_core::templates::{embedded_text, HANDOFF_PLACEHOLDER, OPENCODE_INIT_SCRIPT};
use proj_setup_core::types::{CliTool, ServerMode, Workflow};
use proj_setup_core::Result;
use serde::Serialize;
use tracing::info;

/// Fully specified cli-config step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfigRequest {
    pub project_dir: Utf8PathBuf,
    pub workflow: Workflow,
    pub cli: CliTool,
    /// Only meaningful when opencode is selected
    pub server: ServerMode,
    /// Scaffold `.opencode/commands/init.py`
    pub include_init_script: bool,
    /// Scaffold `.opencode/mcp/handoff.py` when both tools are selected
    pub include_handoff: bool,
}

impl CliConfigRequest {
    /// Defaults: both tools, assisted workflow, local server, no scripts
    pub fn new(project_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            workflow: Workflow::default(),
            cli: CliTool::default(),
            server: ServerMode::default(),
            include_init_script: false,
            include_handoff: false,
        }
    }
}

/// Result of the cli-config step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliConfigOutcome {
    /// Files written, in order
    pub written: Vec<Utf8PathBuf>,
}

#[derive(Serialize)]
struct OpencodeSettings {
    server: ServerMode,
    workflow: Workflow,
}

#[derive(Serialize)]
struct ClaudeSettings {
    workflow: Workflow,
}

/// Run the cli-config step
pub async fn cli_config(ctx: &StepContext, request: &CliConfigRequest) -> Result<CliConfigOutcome> {
    let project = ctx.resolve(&request.project_dir);
    require_dir(&project)?;

    let mut outcome = CliConfigOutcome::default();
    let opencode_dir = project.join(".opencode");

    if request.cli.includes_opencode() {
        let settings = OpencodeSettings {
            server: request.server,
            workflow: request.workflow,
        };
        outcome
            .written
            .push(write_json(opencode_dir.join("settings.json"), &settings).await?);

        if request.include_init_script {
            let script = embedded_text(OPENCODE_INIT_SCRIPT)?;
            outcome
                .written
                .push(write_file(opencode_dir.join("commands").join("init.py"), script).await?);
        }
    }

    if request.cli.includes_claude() {
        let settings = ClaudeSettings {
            workflow: request.workflow,
        };
        outcome.written.push(
            write_json(project.join(".claude").join("settings.json"), &settings).await?,
        );
    }

    if request.cli == CliTool::Both && request.include_handoff {
        let placeholder = embedded_text(HANDOFF_PLACEHOLDER)?;
        outcome
            .written
            .push(write_file(opencode_dir.join("mcp").join("handoff.py"), placeholder).await?);
    }

    info!(
        "CLI configuration complete ({}, {} workflow)",
        request.cli, request.workflow
    );
    Ok(outcome)
}
