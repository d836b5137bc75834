//! Editor settings and pytest scaffolding

use crate::files::{write_file, write_json};
use camino::{Utf8Path, Utf8PathBuf};
use proj_setup_core::templates::{embedded_text, EDITORCONFIG, EXAMPLE_TEST, PYTEST_INI};
use proj_setup_core::Result;
use serde_json::json;
use tracing::info;

/// Interpreter path VS Code should use inside the project
pub fn interpreter_path() -> &'static str {
    if cfg!(windows) {
        ".venv/Scripts/python.exe"
    } else {
        ".venv/bin/python"
    }
}

/// Write `.vscode/settings.json` and `.editorconfig`
pub async fn write_ide_config(project: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let settings = json!({
        "python.defaultInterpreterPath": interpreter_path(),
        "python.analysis.typeCheckingMode": "basic",
        "editor.formatOnSave": true,
        "editor.codeActionsOnSave": {
            "source.organizeImports": true
        }
    });

    let written = vec![
        write_json(project.join(".vscode").join("settings.json"), &settings).await?,
        write_file(project.join(".editorconfig"), embedded_text(EDITORCONFIG)?).await?,
    ];

    info!("IDE configuration written to {}", project);
    Ok(written)
}

/// Write `tests/__init__.py`, `tests/test_example.py` and `pytest.ini`
pub async fn scaffold_pytest(project: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let tests_dir = project.join("tests");

    let written = vec![
        write_file(tests_dir.join("__init__.py"), "").await?,
        write_file(tests_dir.join("test_example.py"), embedded_text(EXAMPLE_TEST)?).await?,
        write_file(project.join("pytest.ini"), embedded_text(PYTEST_INI)?).await?,
    ];

    info!("pytest scaffolded in {}", project);
    Ok(written)
}
