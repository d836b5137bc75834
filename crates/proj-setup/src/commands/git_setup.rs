//! `proj-setup git-setup` command handler

use anyhow::Result;
use proj_setup_core::templates::GitignoreTemplate;
use proj_setup_core::types::{GitMode, Visibility};
use proj_setup_core::{Error, SetupConfig};
use proj_setup_steps::git::{check_git_available, git_setup, GitRequest, NewRepo};
use proj_setup_steps::StepContext;

use super::{confirm, input, input_optional, parse_choice, select};
use crate::cli::GitSetupArgs;
use crate::output;

pub async fn run(args: GitSetupArgs, ctx: &StepContext, config: &SetupConfig) -> Result<()> {
    // Fail before prompting when git is missing
    check_git_available(ctx).await?;

    let request = match parse_choice::<GitMode>(args.mode.as_deref())? {
        Some(mode) => request_from_flags(mode, args, config)?,
        None => prompt_request(args.name, config)?,
    };

    let spinner = output::spinner(match request.mode() {
        GitMode::New => "Initializing repository...",
        GitMode::Existing => "Cloning repository...",
        GitMode::None => "Creating directory...",
    });
    let outcome = git_setup(ctx, &request).await;
    spinner.finish_and_clear();

    output::result(outcome?.path.as_str());
    Ok(())
}

fn visibility(public: bool, private: bool) -> Visibility {
    if public && !private {
        Visibility::Public
    } else {
        Visibility::Private
    }
}

fn request_from_flags(
    mode: GitMode,
    args: GitSetupArgs,
    config: &SetupConfig,
) -> Result<GitRequest> {
    let request = match mode {
        GitMode::None => GitRequest::None {
            name: args.name.ok_or_else(|| Error::missing_argument("project name"))?,
        },
        GitMode::New => GitRequest::New(NewRepo {
            name: args.name.ok_or_else(|| Error::missing_argument("project name"))?,
            description: args.description,
            visibility: visibility(args.public, args.private),
            gitignore: args.include_gitignore.then(|| {
                args.template
                    .unwrap_or_else(|| config.defaults.gitignore_template.clone())
            }),
            readme: args.include_readme,
        }),
        GitMode::Existing => GitRequest::Existing {
            url: args.url.ok_or_else(|| Error::missing_argument("--url"))?,
            target: args.name,
        },
    };
    Ok(request)
}

fn prompt_request(name: Option<String>, config: &SetupConfig) -> Result<GitRequest> {
    let mode = select("Git mode", &GitMode::all(), GitMode::New)?;

    let request = match mode {
        GitMode::None => GitRequest::None {
            name: match name {
                Some(name) => name,
                None => input("Project name")?,
            },
        },
        GitMode::New => {
            let name = match name {
                Some(name) => name,
                None => input("Project name")?,
            };
            let visibility = select("Visibility", &Visibility::all(), Visibility::default())?;
            let description = input_optional("Description (optional)", "")?;
            let gitignore = if confirm("Include .gitignore?", true)? {
                let templates = GitignoreTemplate::all();
                let default = GitignoreTemplate::from_name(&config.defaults.gitignore_template);
                Some(select("Gitignore template", &templates, default)?.to_string())
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
            target: match name {
                Some(name) => Some(name),
                None => input_optional("Folder name (leave empty to derive from URL)", "")?,
            },
        },
    };
    Ok(request)
}
