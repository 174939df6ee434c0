//! Clap derive structures for the `adoptly` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// adoptly -- browse adoptable pets from the command line
#[derive(Debug, Parser)]
#[command(
    name = "adoptly",
    version,
    about = "Browse the adoptable pets catalog from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Pet API base URL (overrides config file)
    #[arg(long, env = "ADOPTLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ADOPTLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the pet catalog
    #[command(alias = "p")]
    Pets(PetsArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Pets ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PetsArgs {
    #[command(subcommand)]
    pub command: PetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PetsCommand {
    /// List every pet in the catalog
    #[command(alias = "ls")]
    List {
        /// Add a pet locally after loading, as NAME:TYPE[:ID] (repeatable).
        /// Local pets are shown first and never sent to the server.
        #[arg(long = "add-local", value_name = "NAME:TYPE[:ID]")]
        add_local: Vec<String>,
    },

    /// Show a single pet
    Get {
        /// Pet identifier (passed to the API unchanged)
        id: String,

        /// Retry this many times after a failed load
        #[arg(long, default_value = "0")]
        retry: u32,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
