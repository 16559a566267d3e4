//! Go string enum declarations.

use crate::naming::{go_exported_name, string_literal, unique_names};
use crate::symbols::Symbols;
use pocketgen_schema::ir::Property;

/// Renders a named string type plus one constant per option.
///
/// Constant names are the type name followed by the PascalCase literal, in
/// option order. Returns an empty string for non-enum properties.
#[must_use]
pub fn render_enum(property: &Property, symbols: &Symbols) -> String {
    if !property.is_enum() {
        return String::new();
    }

    let name = symbols.enum_name(property);
    let options = property.options();
    let mut output = format!("type {} string", name);

    if options.is_empty() {
        return output;
    }

    let constants = constant_names(&name, options);

    output.push_str("\n\nconst (\n");
    for (constant, literal) in constants.iter().zip(options) {
        output.push_str(&format!(
            "\t{} {} = {}\n",
            constant,
            name,
            string_literal(literal)
        ));
    }
    output.push(')');

    output
}

/// Returns the constant names of an enum type, in option order.
#[must_use]
pub fn constant_names(name: &str, options: &[String]) -> Vec<String> {
    unique_names(options, |literal| format!("{}{}", name, go_exported_name(literal)))
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
            "type PostsStatusOptions string\n\nconst (\n\
             \tPostsStatusOptionsDraft PostsStatusOptions = \"draft\"\n\
             \tPostsStatusOptionsPublished PostsStatusOptions = \"published\"\n\
             \tPostsStatusOptionsArchived PostsStatusOptions = \"archived\"\n)"
        );
    }

    #[test]
    fn test_render_enum_empty() {
        let state = Property::new("state", "tasks", PropertyKind::Enum);
        assert_eq!(render_enum(&state, &Symbols::default()), "type TasksStateOptions string");
    }

    #[test]
    fn test_render_enum_unique_constants() {
        let size = Property::new("size", "shirts", PropertyKind::Enum)
            .with_options(["x-large", "x_large", ""]);
        let output = render_enum(&size, &Symbols::default());

        assert!(output.contains("\tShirtsSizeOptionsXLarge ShirtsSizeOptions = \"x-large\"\n"));
        assert!(output.contains("\tShirtsSizeOptionsXLarge2 ShirtsSizeOptions = \"x_large\"\n"));
        assert!(output.contains("\tShirtsSizeOptionsX ShirtsSizeOptions = \"\"\n"));
    }
}
