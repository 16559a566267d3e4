//! Package-level declaration names.
//!
//! A generated file is one flat scope. The identifiers a collection or an
//! enum declares at the top level are claimed as a group, and a group that
//! clashes with an earlier declaration is renamed as a whole with a numeric
//! suffix. Collections are claimed before enums, in model order.

use crate::golang::enums::constant_names;
use crate::naming::{Namespace, go_exported_name};
use crate::target::Target;
use crate::{golang, typescript};
use pocketgen_schema::CollectionModel;
use pocketgen_schema::ir::Property;
use std::collections::HashMap;

/// Top-level names of the collections and enums in one generated file.
#[derive(Debug, Clone, Default)]
pub struct Symbols {
    types: HashMap<String, String>,
    enums: HashMap<(String, String), String>,
}

impl Symbols {
    /// Assigns collision-free names to the declarations of `models`.
    #[must_use]
    pub fn new(models: &[CollectionModel], target: Target) -> Self {
        let mut namespace = Namespace::new();
        let mut symbols = Self::default();

        for model in models {
            if symbols.types.contains_key(model.name()) {
                continue;
            }

            let stem = go_exported_name(model.name());
            let name = namespace.claim_group(&stem, |name| collection_declarations(target, name));
            if name != stem {
                tracing::warn!(
                    "Collection {} clashes with an earlier declaration, generating it as {}",
                    model.name(),
                    name
                );
            }
            symbols.types.insert(model.name().to_string(), name);
        }

        for model in models {
            for property in model.distinct_enums() {
                let key = enum_key(property);
                if symbols.enums.contains_key(&key) {
                    continue;
                }

                let stem = go_exported_name(&property.enum_type_name());
                let name = namespace.claim_group(&stem, |name| {
                    enum_declarations(target, name, property.options())
                });
                if name != stem {
                    tracing::warn!(
                        "Enum of {}.{} clashes with an earlier declaration, generating it as {}",
                        property.owner_collection,
                        property.name,
                        name
                    );
                }
                symbols.enums.insert(key, name);
            }
        }

        symbols
    }

    /// Returns the type name of a collection.
    ///
    /// Collections outside the file keep their PascalCase name.
    #[must_use]
    pub fn type_name(&self, collection: &str) -> String {
        self.types
            .get(collection)
            .cloned()
            .unwrap_or_else(|| go_exported_name(collection))
    }

    /// Returns the name of a collection's expand declaration.
    #[must_use]
    pub fn expand_name(&self, collection: &str) -> String {
        format!("{}Expand", self.type_name(collection))
    }

    /// Returns the enum type name of an enum property.
    #[must_use]
    pub fn enum_name(&self, property: &Property) -> String {
        self.enums
            .get(&enum_key(property))
            .cloned()
            .unwrap_or_else(|| go_exported_name(&property.enum_type_name()))
    }
}

fn enum_key(property: &Property) -> (String, String) {
    (property.owner_collection.clone(), property.name.clone())
}

fn collection_declarations(target: Target, name: &str) -> Vec<String> {
    match target {
        Target::TypeScript => typescript::interfaces::declarations(name),
        Target::GoStruct => golang::structs::declarations(name),
        Target::GoRecord => golang::records::declarations(name),
    }
}

fn enum_declarations(target: Target, name: &str, options: &[String]) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if target != Target::TypeScript {
        names.extend(constant_names(name, options));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketgen_schema::{RawCollection, RawField, interpret};

    fn models(all: &[RawCollection]) -> Vec<CollectionModel> {
        interpret(all, all)
    }

    #[test]
    fn test_record_functions_do_not_clash_with_types() {
        let all = vec![
            RawCollection::new("pbc_new_posts", "new_posts"),
            RawCollection::new("pbc_posts", "posts"),
        ];
        let models = models(&all);

        let symbols = Symbols::new(&models, Target::GoRecord);
        assert_eq!(symbols.type_name("new_posts"), "NewPosts");
        assert_eq!(symbols.type_name("posts"), "Posts2");

        let symbols = Symbols::new(&models, Target::GoStruct);
        assert_eq!(symbols.type_name("posts"), "Posts");
    }

    #[test]
    fn test_enum_names_are_unique_across_collections() {
        let all = vec![
            RawCollection::new("pbc_1", "a_b")
                .with_field(RawField::new("c", "select").with_values(["x"])),
            RawCollection::new("pbc_2", "a")
                .with_field(RawField::new("b_c", "select").with_values(["y"])),
        ];
        let models = models(&all);

        for target in Target::ALL {
            let symbols = Symbols::new(&models, target);
            let first = symbols.enum_name(&models[0].properties()[0]);
            let second = symbols.enum_name(&models[1].properties()[0]);
            assert_eq!(first, "ABCOptions", "{target}");
            assert_eq!(second, "ABCOptions2", "{target}");
        }
    }

    #[test]
    fn test_enum_yields_to_collection_type() {
        let all = vec![
            RawCollection::new("pbc_1", "posts")
                .with_field(RawField::new("status", "select").with_values(["draft"])),
            RawCollection::new("pbc_2", "posts_status_options_draft"),
        ];
        let models = models(&all);

        let symbols = Symbols::new(&models, Target::GoStruct);
        assert_eq!(symbols.type_name("posts_status_options_draft"), "PostsStatusOptionsDraft");
        assert_eq!(symbols.enum_name(&models[0].properties()[0]), "PostsStatusOptions2");

        let symbols = Symbols::new(&models, Target::TypeScript);
        assert_eq!(symbols.enum_name(&models[0].properties()[0]), "PostsStatusOptions");
    }

    #[test]
    fn test_unknown_collection_falls_back() {
        let symbols = Symbols::default();
        assert_eq!(symbols.type_name("blog_posts"), "BlogPosts");
        assert_eq!(symbols.expand_name("blog_posts"), "BlogPostsExpand");
    }
}
