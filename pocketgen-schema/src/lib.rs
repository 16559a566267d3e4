//! # pocketgen Schema
//!
//! PocketBase collection schema model and interpretation.
//!
//! This crate provides:
//! - Raw collection and field records as returned by the collections API
//! - Classification of field type tags into a closed set of property kinds
//! - The intermediate property model consumed by the code generators
//! - Collection selection policies

pub mod error;
pub mod ir;
pub mod parser;
pub mod selection;
pub mod types;

pub use error::{ParseError, SelectionError};
pub use ir::{
    CollectionModel, Diagnostic, DiagnosticKind, InterpretOptions, Interpretation, Interpreter,
    Property, PropertyData, RelationTarget, interpret,
};
pub use parser::{parse_collections, parse_collections_file};
pub use selection::{CollectionSelector, SelectionPolicy};
pub use types::{
    CollectionType, CollectionsResponse, PropertyKind, RawCollection, RawField, classify,
};
