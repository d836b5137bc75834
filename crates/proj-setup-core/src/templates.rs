//! Embedded file templates
//!
//! Every file the setup steps write from fixed text lives under
//! `embedded/templates/` and is compiled into the binary.

use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/templates/"]
#[prefix = ""]
struct EmbeddedTemplates;

pub const EDITORCONFIG: &str = "ide/editorconfig";
pub const PYTEST_INI: &str = "pytest/pytest.ini";
pub const EXAMPLE_TEST: &str = "pytest/test_example.py";
pub const OPENCODE_INIT_SCRIPT: &str = "cli/opencode_init.py";
pub const HANDOFF_PLACEHOLDER: &str = "cli/handoff.py";
const README: &str = "readme.md.tera";

/// Load an embedded template as text
pub fn embedded_text(path: &str) -> Result<String> {
    let file = EmbeddedTemplates::get(path)
        .ok_or_else(|| Error::invalid_config(format!("Embedded template not found: {}", path)))?;

    String::from_utf8(file.data.into_owned())
        .map_err(|_| Error::invalid_config(format!("Invalid UTF-8 in embedded template: {}", path)))
}

/// Named gitignore presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GitignoreTemplate {
    Python,
    Node,
    Rust,
    Go,
    /// Ignores everything (`*`)
    Blank,
}

impl GitignoreTemplate {
    pub fn all() -> Vec<Self> {
        vec![Self::Python, Self::Node, Self::Rust, Self::Go, Self::Blank]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Node => "Node",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Blank => "Blank",
        }
    }

    /// Look up a preset by name (case-insensitive); unknown names map to `Blank`
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim();
        Self::all()
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .unwrap_or(Self::Blank)
    }

    /// Text of the preset
    pub fn content(&self) -> Result<String> {
        embedded_text(&format!("gitignore/{}.gitignore", self.name()))
    }
}

impl std::fmt::Display for GitignoreTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Gitignore text for a template name, falling back to `Blank`
pub fn gitignore_content(name: &str) -> Result<String> {
    GitignoreTemplate::from_name(name).content()
}

/// Render README.md: a title line and the description when one is given
pub fn render_readme(project_name: &str, description: Option<&str>) -> Result<String> {
    let template = embedded_text(README)?;

    let mut context = Context::new();
    context.insert("name", project_name);
    context.insert(
        "description",
        &description.filter(|d| !d.is_empty()),
    );

    Ok(Tera::one_off(&template, &context, false)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gitignore_template_is_embedded() {
        for template in GitignoreTemplate::all() {
            let content = template.content().unwrap();
            assert!(!content.is_empty(), "{} is empty", template);
            assert!(content.ends_with('\n'));
        }
    }

    #[test]
    fn test_unknown_template_name_is_blank() {
        let blank = GitignoreTemplate::Blank.content().unwrap();
        assert_eq!(blank, "*\n");

        for name in ["Haskell", "", "pythonn", "Node.js"] {
            assert_eq!(GitignoreTemplate::from_name(name), GitignoreTemplate::Blank);
            assert_eq!(gitignore_content(name).unwrap(), blank);
        }
    }

    #[test]
    fn test_template_lookup_ignores_case() {
        assert_eq!(GitignoreTemplate::from_name("python"), GitignoreTemplate::Python);
        assert_eq!(GitignoreTemplate::from_name("RUST"), GitignoreTemplate::Rust);
        assert!(gitignore_content("Python").unwrap().contains(".venv/"));
        assert!(gitignore_content("Node").unwrap().contains("node_modules/"));
    }

    #[test]
    fn test_render_readme_with_description() {
        let readme = render_readme("demo", Some("A small demo")).unwrap();
        assert_eq!(readme, "# demo\n\nA small demo\n");
    }

    #[test]
    fn test_render_readme_without_description() {
        assert_eq!(render_readme("demo", None).unwrap(), "# demo\n\n");
        assert_eq!(render_readme("demo", Some("")).unwrap(), "# demo\n\n");
    }

    #[test]
    fn test_render_readme_keeps_description_verbatim() {
        let readme = render_readme("demo", Some("  indented  ")).unwrap();
        assert_eq!(readme, "# demo\n\n  indented  \n");
    }

    #[test]
    fn test_static_templates_are_embedded() {
        for path in [
            EDITORCONFIG,
            PYTEST_INI,
            EXAMPLE_TEST,
            OPENCODE_INIT_SCRIPT,
            HANDOFF_PLACEHOLDER,
        ] {
            assert!(embedded_text(path).is_ok(), "missing {}", path);
        }
        assert!(embedded_text("nope/missing.txt").is_err());
    }
}
