//! Go type expressions.
//!
//! | Kind | Type |
//! |------|------|
//! | String, File | `string` |
//! | Number | `float64` |
//! | Boolean | `bool` |
//! | Date | `types.DateTime` |
//! | Json | `map[string]any` |
//! | Enum | synthesized enum name |
//! | Relation | `string` record id, or `*Target` when resolved records are embedded |
//!
//! Arrays render as `[]T`. Optional fields get `omitempty` in their JSON tag;
//! with explicit optionality they also become pointers (`*T`, `*[]T`), except
//! for types that are already nilable.

use crate::symbols::Symbols;
use crate::target::TargetSpec;
use pocketgen_schema::ir::Property;
use pocketgen_schema::types::PropertyKind;

/// Go type of an unresolved relation record.
pub const OPAQUE_OBJECT: &str = "map[string]any";

/// Returns the Go type of a single value of the property.
#[must_use]
pub fn element_type(property: &Property, spec: &TargetSpec, symbols: &Symbols) -> String {
    match property.kind {
        PropertyKind::String | PropertyKind::File => "string".to_string(),
        PropertyKind::Number => "float64".to_string(),
        PropertyKind::Boolean => "bool".to_string(),
        PropertyKind::Date => "types.DateTime".to_string(),
        PropertyKind::Json => OPAQUE_OBJECT.to_string(),
        PropertyKind::Enum => symbols.enum_name(property),
        PropertyKind::Relation if spec.relation_as_foreign_key_string => "string".to_string(),
        PropertyKind::Relation => resolved_type(property, symbols),
    }
}

/// Returns the resolved relation type, ignoring the foreign key style.
#[must_use]
pub fn resolved_type(property: &Property, symbols: &Symbols) -> String {
    match property.relation_target() {
        Some(target) => format!("*{}", symbols.type_name(target)),
        None => OPAQUE_OBJECT.to_string(),
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
    let element = element_type(property, spec, symbols);
    let explicit = property.optional && spec.make_optional_fields_explicitly_optional;

    match (property.is_array, explicit) {
        (true, true) => format!("*[]{}", element),
        (true, false) => format!("[]{}", element),
        (false, true) if !is_nilable(&element) => format!("*{}", element),
        (false, _) => element,
    }
}

/// Renders the type of the property's member in the expand struct.
#[must_use]
pub fn render_expand_type(property: &Property, symbols: &Symbols) -> String {
    let element = resolved_type(property, symbols);
    if property.is_array {
        format!("[]{}", element)
    } else {
        element
    }
}

/// Renders the JSON struct tag of a field.
#[must_use]
pub fn json_tag(name: &str, optional: bool) -> String {
    if optional {
        format!("`json:\"{},omitempty\"`", name)
    } else {
        format!("`json:\"{}\"`", name)
    }
}

fn is_nilable(ty: &str) -> bool {
    ty.starts_with('*') || ty.starts_with("map[") || ty.starts_with("[]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketgen_schema::ir::RelationTarget;

    fn authors_relation() -> Property {
        Property::new("author", "posts", PropertyKind::Relation)
            .with_relation(RelationTarget::Resolved("authors".to_string()))
    }

    #[test]
    fn test_scalar_types() {
        let spec = TargetSpec::default();
        let cases = [
            (PropertyKind::String, "string"),
            (PropertyKind::File, "string"),
            (PropertyKind::Number, "float64"),
            (PropertyKind::Boolean, "bool"),
            (PropertyKind::Date, "types.DateTime"),
            (PropertyKind::Json, "map[string]any"),
        ];
        for (kind, expected) in cases {
            let property = Property::new("value", "things", kind);
            assert_eq!(render_type(&property, &spec, &Symbols::default()), expected, "{kind}");
        }
    }

    #[test]
    fn test_explicit_optional_composition() {
        let spec = TargetSpec::new().explicit_optional(true);
        let scalar = Property::new("scores", "games", PropertyKind::Number);
        let required = scalar.clone().array(true);
        let optional = required.clone().optional(true);

        assert_eq!(render_type(&scalar, &spec, &Symbols::default()), "float64");
        assert_eq!(render_type(&scalar.clone().optional(true), &spec, &Symbols::default()), "*float64");
        assert_eq!(render_type(&required, &spec, &Symbols::default()), "[]float64");
        assert_eq!(render_type(&optional, &spec, &Symbols::default()), "*[]float64");
    }

    #[test]
    fn test_explicit_optional_keeps_nilable_types() {
        let spec = TargetSpec::new().explicit_optional(true);
        let meta = Property::new("meta", "things", PropertyKind::Json).optional(true);
        assert_eq!(render_type(&meta, &spec, &Symbols::default()), "map[string]any");

        let author = authors_relation().optional(true);
        assert_eq!(render_type(&author, &spec, &Symbols::default()), "*Authors");
    }

    #[test]
    fn test_relation_types() {
        let author = authors_relation();
        assert_eq!(render_type(&author, &TargetSpec::default(), &Symbols::default()), "*Authors");
        assert_eq!(
            render_type(&author, &TargetSpec::new().relation_ids(true), &Symbols::default()),
            "string"
        );
        assert_eq!(
            render_type(&author.clone().array(true), &TargetSpec::new().relation_ids(true), &Symbols::default()),
            "[]string"
        );
        assert_eq!(render_expand_type(&author.array(true), &Symbols::default()), "[]*Authors");

        let unresolved = Property::new("post", "comments", PropertyKind::Relation);
        assert_eq!(render_type(&unresolved, &TargetSpec::default(), &Symbols::default()), "map[string]any");
    }

    #[test]
    fn test_json_tag() {
        assert_eq!(json_tag("title", false), "`json:\"title\"`");
        assert_eq!(json_tag("title", true), "`json:\"title,omitempty\"`");
    }
}
