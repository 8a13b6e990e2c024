//! CLI definitions using clap derive API
//!
//! Every flag is declared here; unknown flags are rejected with a usage
//! error rather than accepted permissively.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};

/// promptkit - prompt template installer
///
/// Install reusable prompt commands and agents from bundled or workspace
/// source trees into a global or local target directory.
#[derive(Parser, Debug)]
#[command(
    name = "promptkit",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Installer for reusable AI prompt commands and agents",
    long_about = "promptkit discovers prompt templates (commands and agents) from a bundled \
                  or workspace source tree, lets you pick what to install through a guided \
                  set of prompts, and keeps a manifest of everything installed at the target.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  promptkit init\n    \
                  promptkit init --install-mode default --non-interactive\n    \
                  promptkit init --installation-type local --commands explore plan\n    \
                  promptkit init --dry-run\n    \
                  promptkit list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install prompt templates into a target directory
    Init(InitArgs),

    /// List available prompt templates and their installed state
    List(ListArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallModeArg {
    /// Recommended selection, global target, no further questions
    Default,
    /// Pick targets and items step by step
    Custom,
}

impl InstallModeArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallModeArg::Default => "default",
            InstallModeArg::Custom => "custom",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallationTypeArg {
    /// Install under the home directory
    Global,
    /// Install under the current directory
    Local,
}

impl InstallationTypeArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationTypeArg::Global => "global",
            InstallationTypeArg::Local => "local",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionModeArg {
    /// Install every resolved item
    All,
    /// Install only the named items
    Specific,
}

impl SelectionModeArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionModeArg::All => "all",
            SelectionModeArg::Specific => "specific",
        }
    }
}

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Guided install:\n    promptkit init\n\n\
                  Recommended defaults without prompts:\n    promptkit init --non-interactive\n\n\
                  Specific commands into the local target:\n    \
                  promptkit init --installation-type local --commands explore plan\n\n\
                  Preview without writing:\n    promptkit init --dry-run\n\n\
                  Replace already-installed files:\n    promptkit init --force")]
pub struct InitArgs {
    /// Installation mode
    #[arg(long, value_enum)]
    pub install_mode: Option<InstallModeArg>,

    /// Target location
    #[arg(long, value_enum)]
    pub installation_type: Option<InstallationTypeArg>,

    /// Whether to install commands
    #[arg(long, value_name = "BOOL")]
    pub install_commands: Option<bool>,

    /// Whether to install agents
    #[arg(long, value_name = "BOOL")]
    pub install_agents: Option<bool>,

    /// How commands are selected
    #[arg(long, value_enum)]
    pub command_selection_mode: Option<SelectionModeArg>,

    /// How agents are selected
    #[arg(long, value_enum)]
    pub agent_selection_mode: Option<SelectionModeArg>,

    /// Command names to install (implies --command-selection-mode specific)
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub commands: Vec<String>,

    /// Agent names to install (implies --agent-selection-mode specific)
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub agents: Vec<String>,

    /// Compute and report the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite files that already exist at the target
    #[arg(long)]
    pub force: bool,

    /// Never prompt; missing options fall back to their defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List available items:\n    promptkit list\n\n\
                  Include source paths:\n    promptkit list --detailed")]
pub struct ListArgs {
    /// Show detailed output
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    promptkit completions --shell bash\n\n\
                  Generate zsh completions:\n    promptkit completions --shell zsh")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
