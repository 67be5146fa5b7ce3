//! CLI definition using clap.

use clap::Parser;
use std::path::PathBuf;

/// cmdgen - Turn requested tools into ready-to-run shell commands
#[derive(Parser, Debug)]
#[command(name = "cmdgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// User config listing the requested tools [default: artefact_config.yaml]
    #[arg(short, long)]
    pub user_config: Option<PathBuf>,

    /// System tool catalog [default: tool_config.yaml]
    #[arg(short, long)]
    pub tool_config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
