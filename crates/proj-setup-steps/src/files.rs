//! File writes shared by the scaffolding steps

use camino::{Utf8Path, Utf8PathBuf};
use proj_setup_core::Result;
use serde::Serialize;
use tracing::debug;

/// Write `content` to `path`, creating parent directories and replacing any previous file
pub async fn write_file(path: Utf8PathBuf, content: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, content).await?;
    debug!("Created: {}", path);
    Ok(path)
}

/// Write `value` as two-space indented JSON
pub async fn write_json<T: Serialize>(path: Utf8PathBuf, value: &T) -> Result<Utf8PathBuf> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    write_file(path, content).await
}

/// Error unless `path` is an existing directory
pub(crate) fn require_dir(path: &Utf8Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(proj_setup_core::Error::path_not_found(path.as_str()))
    }
}
