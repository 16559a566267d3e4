//! TypeScript string enum declarations.

use crate::naming::{string_literal, typescript_enum_member, unique_names};
use crate::symbols::Symbols;
use pocketgen_schema::ir::Property;

/// Renders the enum declaration of an enum property.
///
/// Members follow option order; each member's value is the literal itself.
/// Returns an empty string for non-enum properties.
#[must_use]
pub fn render_enum(property: &Property, symbols: &Symbols) -> String {
    if !property.is_enum() {
        return String::new();
    }

    let name = symbols.enum_name(property);
    let options = property.options();

    if options.is_empty() {
        return format!("export enum {} {{}}", name);
    }

    let members = unique_names(options, typescript_enum_member)
        .into_iter()
        .zip(options)
        .map(|(member, literal)| format!("    {} = {}", member, string_literal(literal)))
        .collect::<Vec<_>>();

    format!("export enum {} {{\n{}\n}}", name, members.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketgen_schema::types::PropertyKind;

    #[test]
    fn test_render_enum_preserves_order() {
        let status = Property::new("status", "posts", PropertyKind::Enum)
            .with_options(["draft", "published", "archived"]);

        assert_eq!(
            render_enum(&status, &Symbols::default()),
            "export enum PostsStatusOptions {\n    Draft = \"draft\",\n    Published = \"published\",\n    Archived = \"archived\"\n}"
        );
    }

    #[test]
    fn test_render_enum_colliding_members() {
        let size = Property::new("size", "shirts", PropertyKind::Enum)
            .with_options(["x-large", "x_large", "2xl"]);
        let output = render_enum(&size, &Symbols::default());

        assert!(output.contains("    XLarge = \"x-large\""));
        assert!(output.contains("    XLarge2 = \"x_large\""));
        assert!(output.contains("    _2Xl = \"2xl\""));
    }

    #[test]
    fn test_render_enum_empty() {
        let state = Property::new("state", "tasks", PropertyKind::Enum);
        assert_eq!(render_enum(&state, &Symbols::default()), "export enum TasksStateOptions {}");
    }

    #[test]
    fn test_render_enum_non_enum() {
        let title = Property::new("title", "posts", PropertyKind::String);
        assert!(render_enum(&title, &Symbols::default()).is_empty());
    }
}
