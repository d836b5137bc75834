//! `proj-setup venv-setup` command handler

use anyhow::Result;
use camino::Utf8PathBuf;
use proj_setup_core::types::ProviderPreference;
use proj_setup_steps::venv::{venv_path, venv_setup, ExistingVenv, VenvRequest, VenvStatus};
use proj_setup_steps::StepContext;

use super::{confirm, input_optional};
use crate::cli::VenvSetupArgs;
use crate::output;

pub async fn run(args: VenvSetupArgs, ctx: &StepContext) -> Result<()> {
    let provider = provider(args.use_uv, args.use_python);

    let request = match args.dir {
        // Flags mode never prompts: without --yes an existing .venv is kept
        Some(dir) => VenvRequest {
            project_dir: dir,
            provider,
            on_existing: if args.yes {
                ExistingVenv::Recreate
            } else {
                ExistingVenv::Keep
            },
        },
        None => prompt_request(ctx, provider, args.yes)?,
    };

    let spinner = output::spinner("Creating virtual environment...");
    let outcome = venv_setup(ctx, &request).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    match outcome.status {
        VenvStatus::Kept => {
            output::info(&format!(
                "Virtual environment already exists at: {}",
                outcome.path
            ));
        }
        VenvStatus::Created(provider) | VenvStatus::Recreated(provider) => {
            output::success(&format!(
                "Virtual environment created at: {} ({})",
                outcome.path, provider
            ));
        }
    }
    output::result(&format!("Activate with: {}", outcome.activation));
    Ok(())
}

fn provider(use_uv: bool, use_python: bool) -> ProviderPreference {
    if use_uv {
        ProviderPreference::Uv
    } else if use_python {
        ProviderPreference::Python
    } else {
        ProviderPreference::Auto
    }
}

fn prompt_request(
    ctx: &StepContext,
    provider: ProviderPreference,
    yes: bool,
) -> Result<VenvRequest> {
    let project_dir = input_optional("Project directory", ".")?
        .map(Utf8PathBuf::from)
        .unwrap_or_else(|| Utf8PathBuf::from("."));

    let existing = venv_path(&ctx.resolve(&project_dir));
    let on_existing = if !existing.exists()
        || yes
        || confirm(&format!("{} already exists. Recreate?", existing), false)?
    {
        ExistingVenv::Recreate
    } else {
        ExistingVenv::Keep
    };

    Ok(VenvRequest {
        project_dir,
        provider,
        on_existing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_selection() {
        assert_eq!(provider(false, false), ProviderPreference::Auto);
        assert_eq!(provider(true, false), ProviderPreference::Uv);
        assert_eq!(provider(false, true), ProviderPreference::Python);
    }
}
