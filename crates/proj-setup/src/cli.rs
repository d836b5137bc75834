//! CLI argument parsing with clap
//!
//! Choice values (`--mode`, `--cli`, ...) are taken as plain strings and
//! validated by the commands, so a bad value is reported like any other
//! setup error.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use proj_setup_core::types::Layout;

/// proj-setup - Scaffold Python projects with git, venv, and coding-assistant settings
#[derive(Parser, Debug)]
#[command(name = "proj-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ~/.proj-setup/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Python package skeleton (flat or src layout)
    Layout(LayoutArgs),

    /// Create a project directory: new repository, clone, or plain directory
    GitSetup(GitSetupArgs),

    /// Create the project's .venv with uv or python -m venv
    VenvSetup(VenvSetupArgs),

    /// Write opencode / claude settings for a project
    CliConfig(CliConfigArgs),

    /// Run every setup step in order
    ProjectInit(ProjectInitArgs),
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Project name (prompts for everything when omitted)
    pub name: Option<String>,

    /// Directory to create the project in (default: current)
    #[arg(short, long)]
    pub path: Option<Utf8PathBuf>,

    /// Flat structure (no src/)
    #[arg(long, conflicts_with = "src")]
    pub flat: bool,

    /// src/ structure (default)
    #[arg(long)]
    pub src: bool,
}

impl LayoutArgs {
    /// Structure selected by `--flat` / `--src`
    pub fn layout(&self) -> Layout {
        if self.flat {
            Layout::Flat
        } else if self.src {
            Layout::Src
        } else {
            Layout::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct GitSetupArgs {
    /// Project name, or clone target in existing mode
    pub name: Option<String>,

    /// Mode: new, existing, or none (prompts when omitted)
    #[arg(long)]
    pub mode: Option<String>,

    /// Repository URL for existing mode
    #[arg(long)]
    pub url: Option<String>,

    /// Public repository
    #[arg(long)]
    pub public: bool,

    /// Private repository (default)
    #[arg(long)]
    pub private: bool,

    /// Project description for README.md
    #[arg(long)]
    pub description: Option<String>,

    /// Write .gitignore
    #[arg(long)]
    pub include_gitignore: bool,

    /// Write README.md
    #[arg(long)]
    pub include_readme: bool,

    /// Gitignore template: Python, Node, Rust, Go, Blank
    #[arg(long)]
    pub template: Option<String>,
}

#[derive(Args, Debug)]
pub struct VenvSetupArgs {
    /// Project directory (prompts when omitted)
    pub dir: Option<Utf8PathBuf>,

    /// Recreate an existing .venv without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Use uv
    #[arg(long, conflicts_with = "use_python")]
    pub use_uv: bool,

    /// Use python -m venv
    #[arg(long)]
    pub use_python: bool,
}

#[derive(Args, Debug)]
pub struct CliConfigArgs {
    /// Project directory (default: current)
    pub dir: Option<Utf8PathBuf>,

    /// Workflow type: agentic or assisted
    #[arg(long)]
    pub workflow: Option<String>,

    /// CLI tool: opencode, claude, or both
    #[arg(long)]
    pub cli: Option<String>,

    /// Server mode for opencode: local or server
    #[arg(long)]
    pub server: Option<String>,

    /// Create the opencode /init command script
    #[arg(long)]
    pub include_init: bool,

    /// Include the handoff plugin placeholder (both tools only)
    #[arg(long)]
    pub include_handoff: bool,
}

#[derive(Args, Debug)]
pub struct ProjectInitArgs {
    /// Git mode: new, existing, or none (prompts for everything when omitted)
    #[arg(long)]
    pub git: Option<String>,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Repository URL for existing mode
    #[arg(long)]
    pub url: Option<String>,

    /// Public repository
    #[arg(long)]
    pub public: bool,

    /// Private repository (default)
    #[arg(long)]
    pub private: bool,

    /// Create a virtual environment (default)
    #[arg(long)]
    pub venv: bool,

    /// Skip the virtual environment
    #[arg(long)]
    pub no_venv: bool,

    /// CLI tool: opencode, claude, or both
    #[arg(long)]
    pub cli: Option<String>,

    /// Server mode for opencode: local or server
    #[arg(long)]
    pub server: Option<String>,

    /// Workflow type: agentic or assisted
    #[arg(long)]
    pub workflow: Option<String>,

    /// Scaffold pytest
    #[arg(long)]
    pub pytest: bool,

    /// Skip pytest (default)
    #[arg(long)]
    pub no_pytest: bool,
}
