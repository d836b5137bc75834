//! `proj-setup cli-config` command handler

use anyhow::Result;
use camino::Utf8PathBuf;
use proj_setup_core::types::{CliTool, ServerMode, Workflow};
use proj_setup_steps::cli_config::{cli_config, CliConfigRequest};
use proj_setup_steps::StepContext;

use super::{confirm, input_optional, parse_choice, select};
use crate::cli::CliConfigArgs;
use crate::output;

pub async fn run(args: CliConfigArgs, ctx: &StepContext) -> Result<()> {
    let workflow = parse_choice::<Workflow>(args.workflow.as_deref())?;
    let cli = parse_choice::<CliTool>(args.cli.as_deref())?;
    let server = parse_choice::<ServerMode>(args.server.as_deref())?;

    let request = if workflow.is_some() || cli.is_some() {
        CliConfigRequest {
            project_dir: args.dir.unwrap_or_else(|| Utf8PathBuf::from(".")),
            workflow: workflow.unwrap_or_default(),
            cli: cli.unwrap_or_default(),
            server: server.unwrap_or_default(),
            include_init_script: args.include_init,
            include_handoff: args.include_handoff,
        }
    } else {
        prompt_request(args.dir)?
    };

    let outcome = cli_config(ctx, &request).await?;
    for path in &outcome.written {
        output::result(&format!("Created: {}", path));
    }
    output::success("CLI configuration complete");
    Ok(())
}

fn prompt_request(dir: Option<Utf8PathBuf>) -> Result<CliConfigRequest> {
    let project_dir = match dir {
        Some(dir) => dir,
        None => input_optional("Project directory", ".")?
            .map(Utf8PathBuf::from)
            .unwrap_or_else(|| Utf8PathBuf::from(".")),
    };

    let workflow = select("Workflow type", &Workflow::all(), Workflow::default())?;
    let cli = select("Primary CLI tool", &CliTool::all(), CliTool::default())?;

    let (server, include_init_script) = if cli.includes_opencode() {
        (
            select("Opencode server mode", &ServerMode::all(), ServerMode::default())?,
            confirm("Create /init command script?", false)?,
        )
    } else {
        (ServerMode::default(), false)
    };

    let include_handoff = cli == CliTool::Both && confirm("Include handoff plugin?", false)?;

    Ok(CliConfigRequest {
        project_dir,
        workflow,
        cli,
        server,
        include_init_script,
        include_handoff,
    })
}
