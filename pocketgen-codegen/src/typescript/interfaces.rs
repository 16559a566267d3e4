//! TypeScript interface generation.

use crate::generator::CollectionRenderer;
use crate::symbols::Symbols;
use crate::target::TargetSpec;
use crate::typescript::enums::render_enum;
use crate::typescript::types::{render_expand_property, render_property};
use pocketgen_schema::CollectionModel;

/// Renders collections as TypeScript interfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceRenderer {
    spec: TargetSpec,
}

impl InterfaceRenderer {
    /// Creates a new interface renderer.
    #[must_use]
    pub fn new(spec: TargetSpec) -> Self {
        Self { spec }
    }

    /// Generates the primary interface of a collection.
    fn generate_interface(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let mut output = String::new();
        let name = symbols.type_name(model.name());

        output.push_str(&format!("export interface {} {{\n", name));
        for property in model.properties() {
            output.push_str(&format!(
                "    {}\n",
                render_property(property, &self.spec, symbols)
            ));
        }

        if model.has_relations() {
            if model.properties().iter().any(|p| p.name == "expand") {
                tracing::warn!(
                    "Collection {} has a field named 'expand', skipping the expand member",
                    model.name()
                );
            } else {
                output.push_str(&format!("    expand?: {};\n", symbols.expand_name(model.name())));
            }
        }

        output.push('}');
        output
    }

    /// Generates the expand interface holding resolved relation records.
    fn generate_expand(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "export interface {} {{\n",
            symbols.expand_name(model.name())
        ));
        for property in model.relations() {
            output.push_str(&format!(
                "    {}\n",
                render_expand_property(property, symbols)
            ));
        }
        output.push('}');

        output
    }
}

impl CollectionRenderer for InterfaceRenderer {
    fn render(&self, model: &CollectionModel, symbols: &Symbols) -> String {
        let mut blocks: Vec<String> = model
            .distinct_enums()
            .into_iter()
            .map(|property| render_enum(property, symbols))
            .collect();

        blocks.push(self.generate_interface(model, symbols));

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;
    use pocketgen_schema::{RawCollection, RawField, interpret};

    fn render(renderer: InterfaceRenderer, models: &[CollectionModel]) -> String {
        renderer.render(&models[0], &Symbols::new(models, Target::TypeScript))
    }

    #[test]
    fn test_render_articles() {
        let all = vec![
            RawCollection::new("pbc_articles", "articles")
                .with_field(RawField::new("title", "text").required(true))
                .with_field(
                    RawField::new("status", "select")
                        .with_max_select(1)
                        .with_values(["draft", "live"]),
                ),
        ];
        let models = interpret(&all, &all);
        let output = render(InterfaceRenderer::default(), &models);

        assert_eq!(
            output,
            "export enum ArticlesStatusOptions {\n    Draft = \"draft\",\n    Live = \"live\"\n}\n\n\
             export interface Articles {\n    title: string;\n    status?: ArticlesStatusOptions;\n}"
        );
    }

    #[test]
    fn test_render_relation_with_expand() {
        let all = vec![
            RawCollection::new("pbc_authors", "authors")
                .with_field(RawField::new("name", "text").required(true)),
            RawCollection::new("pbc_posts", "posts")
                .with_field(RawField::new("title", "text").required(true))
                .with_field(
                    RawField::new("author", "relation")
                        .required(true)
                        .with_collection_id("pbc_authors")
                        .with_max_select(1),
                ),
        ];
        let models = interpret([&all[1]], &all);

        let output = render(InterfaceRenderer::default(), &models);
        assert!(output.contains("    author: Authors;\n"));
        assert!(output.contains("    expand?: PostsExpand;\n"));
        assert!(output.ends_with("export interface PostsExpand {\n    author?: Authors;\n}"));
        assert!(!output.contains("pbc_authors"));

        let output = render(InterfaceRenderer::new(TargetSpec::new().relation_ids(true)), &models);
        assert!(output.contains("    author: string;\n"));
        assert!(output.contains("    author?: Authors;\n"));
    }

    #[test]
    fn test_render_unresolved_relation() {
        let all = vec![
            RawCollection::new("pbc_comments", "comments").with_field(
                RawField::new("post", "relation").with_collection_id("pbc_missing"),
            ),
        ];
        let models = interpret(&all, &all);
        let output = render(InterfaceRenderer::default(), &models);

        assert!(output.contains("    post?: object;\n"));
        assert!(output.contains("export interface CommentsExpand {\n    post?: object;\n}"));
    }

    #[test]
    fn test_render_deduplicates_enums() {
        let collection = RawCollection::new("pbc_x", "x")
            .with_field(RawField::new("kind", "select").with_values(["a"]))
            .with_field(RawField::new("kind", "select").with_values(["a"]));
        let all = vec![collection];
        let models = interpret(&all, &all);
        let output = render(InterfaceRenderer::default(), &models);

        assert_eq!(output.matches("export enum XKindOptions").count(), 1);
    }
}
