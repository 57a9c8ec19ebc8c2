//! Clap derive structures for the `ucode` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use ucode_core::util::Charset;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ucode -- object service and notification tooling
#[derive(Debug, Parser)]
#[command(
    name = "ucode",
    version,
    about = "Work with ucode objects, notifications and helpers from the command line",
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
    /// Settings file (defaults to the platform config directory)
    #[arg(long, env = "UCODE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Object service URL (overrides settings)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Application identity (overrides settings)
    #[arg(long, global = true)]
    pub app_id: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, read, update and delete objects
    #[command(alias = "obj")]
    Objects(ObjectsArgs),

    /// Send chat messages, files and push notifications
    Notify(NotifyArgs),

    /// Local helpers (hashing, random strings, number formatting)
    Util(UtilArgs),

    /// Inspect and initialize settings
    Config(ConfigArgs),
}

// ── Objects ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ObjectsArgs {
    #[command(subcommand)]
    pub command: ObjectsCommand,
}

/// Table and request payload shared by every object command.
#[derive(Debug, Args)]
pub struct ObjectTarget {
    /// Table slug
    pub table: String,

    /// Request data as an inline JSON object
    #[arg(long, short = 'd', conflicts_with = "from_file")]
    pub data: Option<String>,

    /// Read request data from a JSON file
    #[arg(long, short = 'f')]
    pub from_file: Option<PathBuf>,

    /// Application identity for this call only
    #[arg(long)]
    pub as_app: Option<String>,

    /// Ask the service to cache the result
    #[arg(long)]
    pub cached: bool,

    /// Skip downstream business-logic hooks
    #[arg(long)]
    pub disable_faas: bool,

    /// Skip response caching
    #[arg(long)]
    pub block_cached: bool,

    /// Skip schema-builder enforcement
    #[arg(long)]
    pub block_builder: bool,

    /// Skip login-table protection
    #[arg(long)]
    pub blocked_login_table: bool,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<i64>,

    /// Rows per page
    #[arg(long)]
    pub limit: Option<i64>,
}

#[derive(Debug, Subcommand)]
pub enum ObjectsCommand {
    /// Create one object
    Create(ObjectTarget),

    /// Update one object (data must carry its guid)
    Update(ObjectTarget),

    /// Update several objects in one call
    MultipleUpdate(ObjectTarget),

    /// Fetch one object by guid
    Get(ObjectTarget),

    /// Fetch one object by guid, lightweight variant
    GetSlim(ObjectTarget),

    /// Paged listing with the filter in the request body
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        target: ObjectTarget,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Paged listing with the filter in the query string
    ListSlim {
        #[command(flatten)]
        target: ObjectTarget,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Paged aggregate listing
    ListAggregate {
        #[command(flatten)]
        target: ObjectTarget,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Run an aggregation pipeline
    Aggregation(ObjectTarget),

    /// Insert or update objects matched on a field (data is a JSON array)
    Upsert {
        #[command(flatten)]
        target: ObjectTarget,

        /// Field used to match existing rows
        #[arg(long, required = true)]
        field_slug: String,
    },

    /// Append many-to-many links
    Link(ObjectTarget),

    /// Remove many-to-many links
    Unlink(ObjectTarget),

    /// Delete one object by guid
    #[command(alias = "rm")]
    Delete(ObjectTarget),

    /// Delete several objects in one call
    MultipleDelete(ObjectTarget),
}

// ── Notify ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NotifyArgs {
    #[command(subcommand)]
    pub command: NotifyCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
    /// Send a tagged text message to every configured chat
    Message {
        /// Message text
        text: String,
    },

    /// Validate the bot token, then post the message to every chat
    MessageV2 {
        /// Message text
        text: String,
    },

    /// Format a log line and send it untagged
    Log {
        /// Level tag of the line
        #[arg(long, short = 'l', default_value = "info")]
        level: LogLevel,

        /// Log message
        text: String,
    },

    /// Upload a file as a document to every configured chat
    File {
        /// File to send
        path: PathBuf,

        /// Attachment name (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Send one push notification
    Push {
        /// Device platform: android or ios
        #[arg(long)]
        platform: String,

        /// Device registration token
        #[arg(long)]
        token: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,
    },
}

// ── Util ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UtilArgs {
    #[command(subcommand)]
    pub command: UtilCommand,
}

#[derive(Debug, Subcommand)]
pub enum UtilCommand {
    /// SHA-256 hex digest of a string
    Hash { data: String },

    /// Check a string against a SHA-256 hex digest
    Verify { data: String, hash: String },

    /// Random string from a character set
    Random {
        /// Number of characters
        #[arg(long, short = 'n', default_value = "16")]
        length: usize,

        /// lower, upper, number, upper-number, lower-upper, lower-number, lower-upper-number
        #[arg(long, short = 'c', default_value = "lower-upper-number")]
        charset: Charset,
    },

    /// Format a number with space-separated thousands
    Spacef {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Keep exactly this many (truncated) decimals
        #[arg(long)]
        digits: Option<usize>,
    },

    /// Round to a number of decimal places
    Round {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        #[arg(long, short = 'p', default_value = "2")]
        precision: i32,
    },

    /// Remove duplicate strings, keeping first occurrences
    Dedup {
        items: Vec<String>,

        /// Lowercase the output
        #[arg(long)]
        lowercase: bool,
    },

    /// Build a `$first` projection stage from dotted field paths
    Project {
        #[arg(required = true)]
        paths: Vec<String>,
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
    /// Show effective settings with secrets redacted
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
