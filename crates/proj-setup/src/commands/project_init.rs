//! `proj-setup project-init` command handler

use anyhow::Result;
use proj_setup_core::templates::GitignoreTemplate;
use proj_setup_core::types::{CliTool, GitMode, ServerMode, Visibility, Workflow};
use proj_setup_core::SetupConfig;
use proj_setup_steps::git::{GitRequest, NewRepo};
use proj_setup_steps::orchestrator::{project_init, CliSelection, InitFlags, InitPlan, InitReport};
use proj_setup_steps::venv::VenvStatus;
use proj_setup_steps::StepContext;

use super::{confirm, input, input_optional, parse_choice, select};
use crate::cli::ProjectInitArgs;
use crate::output;

pub async fn run(args: ProjectInitArgs, ctx: &StepContext, config: &SetupConfig) -> Result<()> {
    let plan = match parse_choice::<GitMode>(args.git.as_deref())? {
        Some(mode) => {
            let flags = flags_from_args(mode, args)?;
            InitPlan::from_flags(&flags, &config.defaults.gitignore_template)?
        }
        None => {
            output::header("Project Initialization");
            prompt_plan(config)?
        }
    };

    let spinner = output::spinner("Initializing project...");
    let report = project_init(ctx, &plan).await;
    spinner.finish_and_clear();
    let report = report?;

    print_report(&report);
    Ok(())
}

fn flags_from_args(mode: GitMode, args: ProjectInitArgs) -> Result<InitFlags> {
    Ok(InitFlags {
        git: Some(mode),
        name: args.name,
        url: args.url,
        public: args.public,
        private: args.private,
        venv: args.venv,
        no_venv: args.no_venv,
        cli: parse_choice(args.cli.as_deref())?,
        server: parse_choice(args.server.as_deref())?,
        workflow: parse_choice(args.workflow.as_deref())?,
        pytest: args.pytest,
        no_pytest: args.no_pytest,
    })
}

fn prompt_plan(config: &SetupConfig) -> Result<InitPlan> {
    let git = match select("Git mode", &GitMode::all(), GitMode::New)? {
        GitMode::New => {
            let name = input("Project name")?;
            let visibility = select("Visibility", &Visibility::all(), Visibility::default())?;
            let description = input_optional("Description (optional)", "")?;
            let gitignore = if confirm("Include .gitignore?", true)? {
                let default = GitignoreTemplate::from_name(&config.defaults.gitignore_template);
                Some(select("Gitignore template", &GitignoreTemplate::all(), default)?.to_string())
            } else {
                None
            };
            let readme = confirm("Include README?", true)?;
            GitRequest::New(NewRepo {
                name,
                description,
                visibility,
                gitignore,
                readme,
            })
        }
        GitMode::Existing => GitRequest::Existing {
            url: input("Repository URL")?,
            target: input_optional("Project name (leave empty to derive from URL)", "")?,
        },
        GitMode::None => GitRequest::None {
            name: input("Project name")?,
        },
    };

    let create_venv = confirm("Create virtual environment?", true)?;
    let cli = select("Primary CLI tool", &CliTool::all(), CliTool::default())?;
    let workflow = select("Workflow type", &Workflow::all(), Workflow::default())?;
    let server = if cli.includes_opencode() {
        select("Opencode server mode", &ServerMode::all(), ServerMode::default())?
    } else {
        ServerMode::default()
    };
    let include_handoff = cli == CliTool::Both && confirm("Include handoff plugin?", false)?;
    let pytest = confirm("Set up pytest testing?", true)?;

    Ok(InitPlan {
        git,
        create_venv,
        cli: CliSelection {
            workflow,
            cli,
            server,
            include_handoff,
        },
        pytest,
    })
}

fn print_report(report: &InitReport) {
    for warning in &report.warnings {
        output::warning(warning);
    }

    output::success("Project initialization complete");
    output::kv("Project", report.project_path.as_str());
    output::kv("Git mode", report.git_mode.as_str());
    if report.committed {
        output::kv("Commit", "created");
    }

    if let Some(venv) = &report.venv {
        let state = match venv.status {
            VenvStatus::Created(provider) | VenvStatus::Recreated(provider) => {
                format!("created with {}", provider)
            }
            VenvStatus::Kept => "kept".to_string(),
        };
        output::kv("Virtual environment", &state);
    }

    output::info("Next steps:");
    output::result(&format!("  cd {}", report.project_path));
    if let Some(venv) = &report.venv {
        output::result(&format!("  {}", venv.activation));
    }
}
