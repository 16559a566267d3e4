//! # pocketgen
//!
//! Generate TypeScript and Go types from PocketBase collection schemas.
//!
//! ## Features
//!
//! - **Total interpretation** - Unknown field types and dangling relations
//!   degrade to permissive types instead of failing the run
//! - **TypeScript** - Interfaces, string enums and expand interfaces
//! - **Go structs** - JSON-tagged structs with typed string constants
//! - **Go record wrappers** - Accessors, expand helpers and lookups on top
//!   of `core.BaseRecordProxy`
//!
//! ## Quick Start
//!
//! ```ignore
//! use pocketgen::prelude::*;
//!
//! let collections = parse_collections(&json)?;
//! let selected = SelectionPolicy::new().apply(&collections);
//! let output = Generator::new(Target::TypeScript).generate_collections(&selected, &collections);
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Collection records, classification and interpretation
//! - [`codegen`] - TypeScript and Go rendering
//! - [`client`] - Schema retrieval from a running PocketBase instance

pub mod prelude;

/// Collection records, classification and interpretation.
pub mod schema {
    pub use pocketgen_schema::*;
}

/// TypeScript and Go code generation.
pub mod codegen {
    pub use pocketgen_codegen::*;
}

/// Schema retrieval.
pub mod client {
    pub use pocketgen_client::*;
}

pub use pocketgen_codegen::{Generator, Target, TargetSpec, generate_from_json, render};
pub use pocketgen_schema::{CollectionModel, Property, PropertyKind, classify, interpret};
