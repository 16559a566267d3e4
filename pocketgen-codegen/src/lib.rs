//! # pocketgen Codegen
//!
//! Code generation from PocketBase collection schemas.
//!
//! This crate provides:
//! - TypeScript interface and enum generation
//! - Go struct generation with JSON tags
//! - Go record wrappers with accessors, expand helpers and lookups
//! - Identifier escaping for both targets

pub mod error;
pub mod generator;
pub mod golang;
pub mod naming;
pub mod symbols;
pub mod target;
pub mod typescript;

pub use error::CodegenError;
pub use generator::{CollectionRenderer, DEFAULT_PACKAGE, Generator};
pub use symbols::Symbols;
pub use target::{Target, TargetSpec};

use pocketgen_schema::{CollectionModel, CollectionSelector};

/// Renders one interpreted collection.
///
/// Go file headers are not included; use [`Generator::generate`] for a
/// complete file. `spec` is ignored for [`Target::GoRecord`]: record
/// wrappers always read relations as record ids and resolve them through
/// their expand helpers.
#[must_use]
pub fn render(model: &CollectionModel, target: Target, spec: TargetSpec) -> String {
    let generator = Generator::new(target).with_spec(spec);
    let symbols = generator.symbols(std::slice::from_ref(model));
    generator.renderer().render(model, &symbols)
}

/// Generates code from a collections JSON document.
///
/// # Arguments
/// * `json` - Collections list response or collections export
/// * `selector` - Chooses the collections to emit
/// * `generator` - Target and style
///
/// # Returns
/// Generated source text.
///
/// # Errors
/// Returns `CodegenError` if parsing or selection fails.
pub fn generate_from_json(
    json: &str,
    selector: &dyn CollectionSelector,
    generator: &Generator,
) -> Result<String, CodegenError> {
    let collections = pocketgen_schema::parse_collections(json)?;
    let selected = selector.select(&collections)?;
    Ok(generator.generate_collections(&selected, &collections))
}

/// Generates code from a collections JSON file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or selection fails.
pub fn generate_from_file(
    path: &std::path::Path,
    selector: &dyn CollectionSelector,
    generator: &Generator,
) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, selector, generator)
}
