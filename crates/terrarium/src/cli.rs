//! Clap derive structures for the `terrarium` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// terrarium -- browse a module registry catalog from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "terrarium",
    version,
    about = "Browse registry modules, providers and releases from the command line",
    long_about = "Lists and searches the modules, providers and recent releases \
        published to a registry's browse API.\n\n\
        Every list can be narrowed with --search and rendered as a table, \
        JSON, YAML or plain text.",
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
    /// Registry profile to use
    #[arg(long, short = 'p', env = "TERRARIUM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Registry browse URL (overrides profile)
    #[arg(long, short = 'u', env = "TERRARIUM_URL", global = true)]
    pub url: Option<String>,

    /// Output format [default: `[defaults] output`, else table]
    #[arg(long, short = 'o', env = "TERRARIUM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: `[defaults] color`, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TERRARIUM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TERRARIUM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
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
    /// Plain text, one value per line (scripting)
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
    /// Browse published modules
    #[command(alias = "mod", alias = "m")]
    Modules(ModulesArgs),

    /// Browse published providers
    #[command(alias = "prov")]
    Providers(ProvidersArgs),

    /// Browse recent releases
    #[command(alias = "rel", alias = "r")]
    Releases(ReleasesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Arguments shared by every list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring to search for
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only show entries from these organizations (repeatable)
    #[arg(long = "org", value_name = "ORG")]
    pub organizations: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MODULES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ModulesArgs {
    #[command(subcommand)]
    pub command: ModulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ModulesCommand {
    /// List modules
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one module and its versions
    #[command(alias = "get")]
    Info {
        /// Module address: org/name/provider
        address: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROVIDERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProvidersArgs {
    #[command(subcommand)]
    pub command: ProvidersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// List providers
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one provider and its versions
    #[command(alias = "get")]
    Info {
        /// Provider address: org/name
        address: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RELEASES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReleasesArgs {
    #[command(subcommand)]
    pub command: ReleasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReleasesCommand {
    /// List releases inside a time window, newest first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// How far back to look: 1h, 24h, 168h, 730h, 2190h, 4380h, 8760h
        /// (or hour, day, week, month, quarter, half-year, year)
        #[arg(long, short = 'a', value_name = "WINDOW")]
        age: Option<String>,

        /// Only show these release types (repeatable)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        types: Vec<String>,
    },

    /// List organizations that have published releases
    Orgs,

    /// List known release types
    Types,

    /// List the selectable time windows
    Windows,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with a profile
    ///
    /// Uses --url when given, otherwise prompts for it.
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the active profile
    Set {
        /// Key: url, ca_cert, insecure, timeout, window
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
