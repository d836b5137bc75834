//! `proj-setup layout` command handler

use anyhow::Result;
use camino::Utf8PathBuf;
use proj_setup_core::types::Layout;
use proj_setup_steps::layout::{create_layout, LayoutRequest};
use proj_setup_steps::StepContext;

use super::{input, input_optional, select};
use crate::cli::LayoutArgs;
use crate::output;

pub async fn run(args: LayoutArgs, ctx: &StepContext) -> Result<()> {
    let layout = args.layout();
    let request = match args.name {
        Some(name) => LayoutRequest {
            name,
            parent: args.path,
            layout,
        },
        None => prompt_request()?,
    };

    let target = create_layout(ctx, &request).await?;
    output::result(target.as_str());
    Ok(())
}

fn prompt_request() -> Result<LayoutRequest> {
    let name = input("Project name")?;
    let parent = input_optional("Target directory (leave empty for current)", "")?
        .map(Utf8PathBuf::from);
    let layout = select("Structure type", &Layout::all(), Layout::default())?;

    Ok(LayoutRequest {
        name,
        parent,
        layout,
    })
}
