//! Go code generation.
//!
//! Two flavours share the type mapping and enum declarations: plain structs
//! with JSON tags, and record wrappers embedding `core.BaseRecordProxy` for
//! use inside a PocketBase application.

pub mod enums;
pub mod records;
pub mod structs;
pub mod types;

pub use enums::render_enum;
pub use records::RecordRenderer;
pub use structs::StructRenderer;
pub use types::{json_tag, render_type};

use pocketgen_schema::CollectionModel;
use pocketgen_schema::types::PropertyKind;

/// Import path of the `dbx` query builder.
pub const DBX_IMPORT: &str = "github.com/pocketbase/dbx";
/// Import path of the PocketBase core package.
pub const CORE_IMPORT: &str = "github.com/pocketbase/pocketbase/core";
/// Import path of the PocketBase types package.
pub const TYPES_IMPORT: &str = "github.com/pocketbase/pocketbase/tools/types";

/// Renders the generated-file marker, package clause and imports.
#[must_use]
pub fn file_header(package: &str, imports: &[&str]) -> String {
    let mut output = String::new();

    output.push_str("// Code generated by pocketgen. DO NOT EDIT.\n\n");
    output.push_str(&format!("package {}", package));

    match imports {
        [] => {}
        [single] => output.push_str(&format!("\n\nimport \"{}\"", single)),
        _ => {
            output.push_str("\n\nimport (\n");
            for import in imports {
                output.push_str(&format!("\t\"{}\"\n", import));
            }
            output.push(')');
        }
    }

    output
}

/// Returns true if any property of the models is a date.
#[must_use]
pub fn uses_dates(models: &[CollectionModel]) -> bool {
    models
        .iter()
        .flat_map(CollectionModel::properties)
        .any(|p| p.kind == PropertyKind::Date)
}
