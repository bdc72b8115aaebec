//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// Clipforge - AI clipboard transformer driven by global hotkeys
#[derive(Parser, Debug)]
#[command(name = "clipforge")]
#[command(version)]
#[command(about = "Transform the current selection with AI via global hotkeys: copy, transform, paste")]
#[command(long_about = None)]
pub struct Cli {
    /// Transform provider (gemini, groq, ollama)
    #[arg(short = 'p', long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Show desktop notifications for completions and failures
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with the default hotkey table
    Init,
    /// Print the current configuration
    Show,
    /// Show config file path
    Path,
    /// Add a hotkey
    Add {
        /// Key combination, e.g. "ctrl+f5"
        #[arg(long)]
        combo: String,
        /// Action name
        #[arg(long)]
        name: String,
        /// Prompt prefixed to the clipboard content
        #[arg(long)]
        prompt: String,
        /// Source kind: text or image
        #[arg(long, default_value = "text")]
        output: String,
        /// Accent color, e.g. "#A3BFFA"
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a hotkey by action name
    Remove {
        /// Action name
        name: String,
    },
    /// Bind an existing action to a new combination
    Rebind {
        /// Action name
        name: String,
        /// New key combination, e.g. "alt+f5"
        combo: String,
    },
}

/// Options for the hotkey listener run mode
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Provider override from the command line
    pub provider: Option<String>,
    /// Desktop notification override from the command line
    pub notify: bool,
}
