//! Prelude module for convenient imports.
//!
//! ```ignore
//! use pocketgen::prelude::*;
//! ```

// Schema types
pub use pocketgen_schema::{
    CollectionModel, CollectionSelector, Diagnostic, InterpretOptions, Interpretation,
    Interpreter, Property, PropertyData, PropertyKind, RawCollection, RawField, RelationTarget,
    SelectionPolicy, classify, interpret, parse_collections,
};

// Code generation
pub use pocketgen_codegen::{CodegenError, CollectionRenderer, Generator, Target, TargetSpec};

// Schema retrieval
pub use pocketgen_client::{
    ClientError, Credentials, FileSource, SchemaClient, SchemaClientBuilder, SchemaSource,
};
