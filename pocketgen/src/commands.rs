//! Subcommand implementations.

use crate::cli::{GenerateArgs, SourceArgs};
use crate::config::{FileConfig, GenerateSettings, partial_credentials, selection_policy};
use crate::output::write_output;
use crate::prompt::{PromptSelector, complete_credentials, passphrase};
use anyhow::{Context, Result};
use pocketgen::Generator;
use pocketgen::client::{Credentials, FileSource, SchemaClientBuilder, SchemaSource};
use pocketgen::schema::{CollectionSelector, Interpreter, RawCollection};
use std::fmt::Write;

/// Run `pocketgen generate`.
pub fn generate(args: &GenerateArgs, config: &FileConfig) -> Result<()> {
    let settings = GenerateSettings::resolve(args, config)?;
    let collections = load_collections(&args.source, config)?;
    let selected = select(&args.source, config, &collections)?;

    let generator = Generator::new(settings.target)
        .with_spec(settings.spec)
        .with_package(settings.package);

    let interpretation = generator.interpret(&selected, &collections);
    if !interpretation.diagnostics.is_empty() {
        tracing::warn!(
            "{} field(s) degraded to permissive types",
            interpretation.diagnostics.len()
        );
    }

    tracing::info!(
        "Generating {} for {} collection(s)",
        settings.target,
        interpretation.models.len()
    );

    let output = generator.generate(&interpretation.models);
    write_output(&output, settings.output.as_deref())
}

/// Run `pocketgen inspect`.
pub fn inspect(args: &SourceArgs, config: &FileConfig) -> Result<()> {
    let collections = load_collections(args, config)?;
    let selected = select(args, config, &collections)?;
    let interpretation = Interpreter::new(&collections).interpret(selected.iter().copied());

    let mut report = String::new();
    for model in &interpretation.models {
        writeln!(report, "{}", model.collection())?;
        for property in model.properties() {
            writeln!(report, "  - {}", property)?;
        }
    }

    if !interpretation.diagnostics.is_empty() {
        writeln!(report, "\nDiagnostics:")?;
        for diagnostic in &interpretation.diagnostics {
            writeln!(report, "  - {}", diagnostic)?;
        }
    }

    write_output(&report, None)
}

/// Fetch the complete collection list from the configured source.
fn load_collections(args: &SourceArgs, config: &FileConfig) -> Result<Vec<RawCollection>> {
    if let Some(schema) = &args.schema {
        return FileSource::new(schema)
            .collections()
            .with_context(|| format!("Failed to load schema: {:?}", schema));
    }

    let credentials =
        complete_credentials(partial_credentials(args, config, || passphrase(false))?)?;

    let mut client = SchemaClientBuilder::new(&credentials.host).build();
    client
        .authenticate(&credentials)
        .with_context(|| format!("Failed to authenticate against {}", client.host()))?;

    if args.save_credentials {
        save_credentials(args, &credentials, || passphrase(true))?;
    }

    client.collections().context("Failed to fetch collections")
}

/// Save `credentials` in the requested format and remove the other file so
/// only one copy is ever kept.
fn save_credentials<P>(args: &SourceArgs, credentials: &Credentials, passphrase: P) -> Result<()>
where
    P: FnOnce() -> Result<String>,
{
    let (path, stale) = if args.encrypt {
        (&args.encrypted_credentials_file, &args.credentials_file)
    } else {
        (&args.credentials_file, &args.encrypted_credentials_file)
    };

    let saved = if args.encrypt {
        let passphrase = match &args.passphrase {
            Some(passphrase) => passphrase.clone(),
            None => passphrase()?,
        };
        credentials.save_encrypted(path, &passphrase)
    } else {
        credentials.save(path)
    };
    saved.with_context(|| format!("Failed to save credentials: {:?}", path))?;

    if stale.exists() {
        std::fs::remove_file(stale)
            .with_context(|| format!("Failed to remove old credentials: {:?}", stale))?;
        tracing::info!("Removed old credentials file {}", stale.display());
    }

    Ok(())
}

/// Apply the interactive or flag-driven selection.
fn select<'a>(
    args: &SourceArgs,
    config: &FileConfig,
    collections: &'a [RawCollection],
) -> Result<Vec<&'a RawCollection>> {
    let policy = selection_policy(args, config);
    let selector: &dyn CollectionSelector = if args.interactive {
        &PromptSelector
    } else {
        &policy
    };

    let selected = selector
        .select(collections)
        .context("Failed to select collections")?;

    if selected.is_empty() {
        tracing::warn!("No collections selected");
    }

    Ok(selected)
}
