//! Shared fixtures for proj-setup-steps integration tests

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use proj_setup_core::types::GitIdentity;
use proj_setup_core::SetupConfig;
use proj_setup_steps::process;
use proj_setup_steps::StepContext;
use tempfile::TempDir;

/// Context rooted in a fresh temp dir, with a fixed commit identity and no uv
pub fn workspace() -> (StepContext, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let cwd = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
    let ctx = StepContext::from_config(&SetupConfig::default(), cwd)
        .with_identity(GitIdentity::new("Test User", "test@example.com"))
        .with_uv("proj-setup-test-no-uv");
    (ctx, temp_dir)
}

/// Executable that behaves like `python -m venv <dir>` just enough for the venv step
#[cfg(unix)]
pub fn fake_python(dir: &Utf8Path) -> String {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-python");
    std::fs::write(
        &script,
        concat!(
            "#!/bin/sh\n",
            "if [ \"$1\" = \"--version\" ]; then echo 'Python 3.12.0'; exit 0; fi\n",
            "mkdir -p \"$3/bin\"\n",
            "touch \"$3/pyvenv.cfg\"\n",
        ),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script.to_string()
}

/// Number of commits reachable from HEAD
pub async fn commit_count(path: &Utf8Path) -> usize {
    let output = process::run("git", ["rev-list", "--count", "HEAD"], Some(path), &[])
        .await
        .unwrap();
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .unwrap_or(0)
}

/// Sorted names of the direct children of `path`
pub fn entries(path: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
