//! Go struct generation.

use crate::generator::CollectionRenderer;
use crate::golang::enums::render_enum;
use crate::golang::types::{json_tag, render_expand_type, render_type};
use crate::golang::{TYPES_IMPORT, file_header, uses_dates};
use crate::naming::{Namespace, go_exported_name};
use crate::symbols::Symbols;
use crate::target::TargetSpec;
use pocketgen_schema::CollectionModel;

/// Renders collections as Go structs with JSON tags.
#[derive(Debug, Clone, Copy)]
pub struct StructRenderer<'a> {
    spec: TargetSpec,
    package: &'a str,
}

impl<'a> StructRenderer<'a> {
    /// Creates a new struct renderer.
    #[must_use]
    pub fn new(spec: TargetSpec, package: &'a str) -> Self {
        Self { spec, package }
    }

    /// Generates the primary struct of a collection.
    fn generate_struct(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let mut output = String::new();
        let mut fields = Namespace::new();

        output.push_str(&format!(
            "type {} struct {{\n",
            symbols.type_name(model.name())
        ));
        for property in model.properties() {
            output.push_str(&format!(
                "\t{} {} {}\n",
                fields.claim(go_exported_name(&property.name)),
                render_type(property, &self.spec, symbols),
                json_tag(&property.name, property.optional)
            ));
        }

        if model.has_relations() {
            if model.properties().iter().any(|p| p.name == "expand") {
                tracing::warn!(
                    "Collection {} has a field named 'expand', skipping the Expand field",
                    model.name()
                );
            } else {
                output.push_str(&format!(
                    "\t{} *{} {}\n",
                    fields.claim("Expand"),
                    symbols.expand_name(model.name()),
                    json_tag("expand", true)
                ));
            }
        }

        output.push('}');
        output
    }

    /// Generates the expand struct holding resolved relation records.
    fn generate_expand(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let mut output = String::new();
        let mut fields = Namespace::new();

        output.push_str(&format!(
            "type {} struct {{\n",
            symbols.expand_name(model.name())
        ));
        for property in model.relations() {
            output.push_str(&format!(
                "\t{} {} {}\n",
                fields.claim(go_exported_name(&property.name)),
                render_expand_type(property, symbols),
                json_tag(&property.name, true)
            ));
        }
        output.push('}');

        output
    }
}

impl CollectionRenderer for StructRenderer<'_> {
    fn header(&self, models: &[CollectionModel]) -> Option<String> {
        let imports: &[&str] = if uses_dates(models) {
            &[TYPES_IMPORT]
        } else {
            &[]
        };
        Some(file_header(self.package, imports))
    }

    fn render(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let mut blocks: Vec<String> = model
            .distinct_enums()
            .into_iter()
            .map(|property| render_enum(property, symbols))
            .collect();

        blocks.push(self.generate_struct(model, symbols));

        if model.has_relations() {
            blocks.push(self.generate_expand(model, symbols));
        }

        blocks.join("\n\n")
    }
}

/// Top-level names declared for a collection type name.
pub(crate) fn declarations(name: &str) -> Vec<String> {
    vec![name.to_string(), format!("{}Expand", name)]
}
