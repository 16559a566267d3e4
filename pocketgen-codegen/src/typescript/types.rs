//! TypeScript type expressions.
//!
//! | Kind | Type |
//! |------|------|
//! | String, File, Date | `string` |
//! | Number | `number` |
//! | Boolean | `boolean` |
//! | Json | `object` (`object \| null \| ""` when optional) |
//! | Enum | synthesized enum name |
//! | Relation | target interface, `object` when unresolved |
//!
//! Optional members are marked with `?`. Arrays render as `T[]`, so an
//! optional array reads `name?: T[]` and a required one `name: T[]`.

use crate::naming::typescript_property_name;
use crate::symbols::Symbols;
use crate::target::TargetSpec;
use pocketgen_schema::ir::Property;
use pocketgen_schema::types::PropertyKind;

/// Returns the TypeScript type of a single value of the property.
#[must_use]
pub fn element_type(property: &Property, spec: &TargetSpec, symbols: &Symbols) -> String {
    match property.kind {
        PropertyKind::String | PropertyKind::File | PropertyKind::Date => "string".to_string(),
        PropertyKind::Number => "number".to_string(),
        PropertyKind::Boolean => "boolean".to_string(),
        PropertyKind::Json => "object".to_string(),
        PropertyKind::Enum => symbols.enum_name(property),
        PropertyKind::Relation if spec.relation_as_foreign_key_string => "string".to_string(),
        PropertyKind::Relation => resolved_type(property, symbols),
    }
}

/// Returns the resolved relation type, ignoring the foreign key style.
#[must_use]
pub fn resolved_type(property: &Property, symbols: &Symbols) -> String {
    match property.relation_target() {
        Some(target) => symbols.type_name(target),
        None => "object".to_string(),
    }
}

/// Renders the full type expression of a property.
///
/// # Arguments
/// * `property` - Property to render
/// * `spec` - Rendering style
/// * `symbols` - Names of the enum and relation target declarations
#[must_use]
pub fn render_type(property: &Property, spec: &TargetSpec, symbols: &Symbols) -> String {
    compose(property, element_type(property, spec, symbols))
}

/// Renders an interface member declaration, without indentation.
#[must_use]
pub fn render_property(property: &Property, spec: &TargetSpec, symbols: &Symbols) -> String {
    member(
        &property.name,
        property.optional,
        &render_type(property, spec, symbols),
    )
}

/// Renders the member of the expand interface for a relation property.
#[must_use]
pub fn render_expand_property(property: &Property, symbols: &Symbols) -> String {
    member(
        &property.name,
        true,
        &compose(property, resolved_type(property, symbols)),
    )
}

fn compose(property: &Property, element: String) -> String {
    if property.is_array {
        if element.contains('|') {
            format!("({})[]", element)
        } else {
            format!("{}[]", element)
        }
    } else if property.optional && property.kind == PropertyKind::Json {
        format!("{} | null | \"\"", element)
    } else {
        element
    }
}

fn member(name: &str, optional: bool, ty: &str) -> String {
    let marker = if optional { "?" } else { "" };
    format!("{}{}: {};", typescript_property_name(name), marker, ty)
}
