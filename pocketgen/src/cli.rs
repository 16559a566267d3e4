//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};
use pocketgen::Target;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pocketgen")]
#[command(author, version, about = "Generate TypeScript and Go types from PocketBase collections", long_about = None)]
pub struct Cli {
    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to pocketgen.toml (default: ./pocketgen.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate code for the selected collections
    Generate(GenerateArgs),

    /// Print the selected collections and their interpreted properties
    Inspect(SourceArgs),
}

/// Where the schema comes from and which collections to use.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// PocketBase URL
    #[arg(long, env = "POCKETGEN_HOST")]
    pub host: Option<String>,

    /// Superuser email
    #[arg(long, env = "POCKETGEN_EMAIL")]
    pub email: Option<String>,

    /// Superuser password
    #[arg(long, env = "POCKETGEN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read collections from an exported JSON file instead of the server
    #[arg(long, conflicts_with = "save_credentials")]
    pub schema: Option<PathBuf>,

    /// Credentials file in dotenv format
    #[arg(long, default_value = "credentials.env")]
    pub credentials_file: PathBuf,

    /// Passphrase-encrypted credentials file, preferred when present
    #[arg(long, default_value = "credentials.enc.env")]
    pub encrypted_credentials_file: PathBuf,

    /// Save the credentials used for this run to the credentials file
    #[arg(long)]
    pub save_credentials: bool,

    /// Save the credentials encrypted with a passphrase
    #[arg(long, requires = "save_credentials")]
    pub encrypt: bool,

    /// Passphrase of the encrypted credentials file
    #[arg(long, env = "POCKETGEN_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Include system collections
    #[arg(short, long)]
    pub all_collections: bool,

    /// Only use these collections (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Skip these collections (comma separated)
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Choose collections interactively
    #[arg(long)]
    pub interactive: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output target (typescript, go, go-record)
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Go package name
    #[arg(long)]
    pub package: Option<String>,

    /// Render optional Go struct fields as pointers
    #[arg(long)]
    pub optional_pointers: bool,

    /// Render relations as record id strings
    #[arg(long)]
    pub relation_ids: bool,
}
