//! Python package skeleton

use crate::context::StepContext;
use crate::files::write_file;
use crate::git::create_project_directory;
use camino::Utf8PathBuf;
use proj_setup_core::types::Layout;
use proj_setup_core::{Error, Result};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRequest {
    pub name: String,
    /// Directory the package is created in; defaults to the context's cwd
    pub parent: Option<Utf8PathBuf>,
    pub layout: Layout,
}

/// Create `<parent>/<name>` with `__init__.py` at the root (`Flat`) or under `src/` (`Src`)
///
/// Missing parent directories are created. An existing target is never touched.
pub async fn create_layout(ctx: &StepContext, request: &LayoutRequest) -> Result<Utf8PathBuf> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(Error::missing_argument("project name"));
    }

    let parent = match &request.parent {
        Some(parent) => ctx.resolve(parent),
        None => ctx.cwd.clone(),
    };
    let target = parent.join(name);

    create_project_directory(&target).await?;

    let package_root = match request.layout {
        Layout::Flat => target.clone(),
        Layout::Src => target.join("src"),
    };
    write_file(package_root.join("__init__.py"), "").await?;

    info!("Created {} layout at {}", request.layout, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_support::temp_context;

    #[tokio::test]
    async fn test_src_layout() {
        let (ctx, _temp) = temp_context();
        let request = LayoutRequest {
            name: "pkg".to_string(),
            parent: None,
            layout: Layout::Src,
        };

        let target = create_layout(&ctx, &request).await.unwrap();

        assert_eq!(target, ctx.cwd.join("pkg"));
        assert!(target.join("src/__init__.py").is_file());
        assert!(!target.join("__init__.py").exists());
    }

    #[tokio::test]
    async fn test_flat_layout_under_new_parent() {
        let (ctx, _temp) = temp_context();
        let request = LayoutRequest {
            name: "pkg".to_string(),
            parent: Some(Utf8PathBuf::from("nested/dir")),
            layout: Layout::Flat,
        };

        let target = create_layout(&ctx, &request).await.unwrap();

        assert_eq!(target, ctx.cwd.join("nested/dir/pkg"));
        assert!(target.join("__init__.py").is_file());
        assert!(!target.join("src").exists());
    }

    #[tokio::test]
    async fn test_existing_target_fails() {
        let (ctx, _temp) = temp_context();
        std::fs::create_dir_all(ctx.cwd.join("pkg")).unwrap();
        let request = LayoutRequest {
            name: "pkg".to_string(),
            parent: None,
            layout: Layout::Src,
        };

        let err = create_layout(&ctx, &request).await.unwrap_err();

        assert!(err.is_collision());
        assert!(!ctx.cwd.join("pkg/src").exists());
    }
}
