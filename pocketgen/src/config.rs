//! Configuration file and settings resolution.
//!
//! Settings come from command-line flags, environment variables, the
//! credentials file and `pocketgen.toml`, in that order of precedence. An
//! encrypted credentials file, when present, takes the place of the plain
//! one.
//! Anything still missing is asked for interactively.

use crate::cli::{GenerateArgs, SourceArgs};
use anyhow::{Context, Result};
use pocketgen::client::Credentials;
use pocketgen::codegen::DEFAULT_PACKAGE;
use pocketgen::schema::SelectionPolicy;
use pocketgen::{Target, TargetSpec};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "pocketgen.toml";

/// pocketgen.toml structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub email: Option<String>,
    pub target: Option<String>,
    pub package: Option<String>,
    pub output: Option<PathBuf>,
    pub all_collections: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub optional_pointers: bool,
    pub relation_ids: bool,
}

impl FileConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the explicit config, or `pocketgen.toml` if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Parsed target, if configured.
    pub fn target(&self) -> Result<Option<Target>> {
        self.target
            .as_deref()
            .map(str::parse::<Target>)
            .transpose()
            .context("Invalid target in config")
    }

    /// Host and email as partial credentials.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.host.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            "",
        )
    }
}

/// Collection selection from flags, falling back to the config file.
pub fn selection_policy(args: &SourceArgs, config: &FileConfig) -> SelectionPolicy {
    let include = if args.include.is_empty() {
        &config.include
    } else {
        &args.include
    };
    let exclude = if args.exclude.is_empty() {
        &config.exclude
    } else {
        &args.exclude
    };

    SelectionPolicy::new()
        .all_collections(args.all_collections || config.all_collections)
        .include(include.iter().cloned())
        .exclude(exclude.iter().cloned())
}

/// Credentials from flags and environment, then the credentials file,
/// then the config file.
///
/// `passphrase` is only called when the encrypted credentials file has to
/// be opened and no passphrase was given on the command line.
pub fn partial_credentials<P>(
    args: &SourceArgs,
    config: &FileConfig,
    passphrase: P,
) -> Result<Credentials>
where
    P: FnOnce() -> Result<String>,
{
    let from_args = Credentials::new(
        args.host.clone().unwrap_or_default(),
        args.email.clone().unwrap_or_default(),
        args.password.clone().unwrap_or_default(),
    );
    if from_args.is_complete() {
        return Ok(from_args);
    }

    let from_file = if args.encrypted_credentials_file.exists() {
        let passphrase = match &args.passphrase {
            Some(passphrase) => passphrase.clone(),
            None => passphrase()?,
        };
        Credentials::load_encrypted(&args.encrypted_credentials_file, &passphrase).with_context(
            || format!("Failed to load credentials: {:?}", args.encrypted_credentials_file),
        )?
    } else {
        Credentials::load_if_exists(&args.credentials_file)
            .with_context(|| format!("Failed to load credentials: {:?}", args.credentials_file))?
            .unwrap_or_default()
    };

    Ok(from_args.or(from_file).or(config.credentials()))
}

/// Resolved generation settings.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub target: Target,
    pub spec: TargetSpec,
    pub package: String,
    pub output: Option<PathBuf>,
}

impl GenerateSettings {
    /// Resolve settings from flags and config.
    pub fn resolve(args: &GenerateArgs, config: &FileConfig) -> Result<Self> {
        let target = match args.target {
            Some(target) => target,
            None => config.target()?.unwrap_or_default(),
        };

        let defaults = target.default_spec();
        let spec = TargetSpec::new()
            .explicit_optional(
                args.optional_pointers
                    || config.optional_pointers
                    || defaults.make_optional_fields_explicitly_optional,
            )
            .relation_ids(
                args.relation_ids || config.relation_ids || defaults.relation_as_foreign_key_string,
            );

        let package = args
            .package
            .clone()
            .or_else(|| config.package.clone())
            .unwrap_or_else(|| DEFAULT_PACKAGE.to_string());

        if !is_go_identifier(&package) {
            anyhow::bail!("Invalid Go package name: {:?}", package);
        }

        Ok(Self {
            target,
            spec,
            package,
            output: args.output.clone().or_else(|| config.output.clone()),
        })
    }
}

fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
