//! Intermediate representation for code generation.
//!
//! This module turns raw collection records into a flattened, fully
//! resolved property model that the generators render without ever
//! looking at the raw schema again.

use crate::types::{PropertyKind, RawCollection, RawField};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Kind-specific payload of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyData {
    /// No extra data.
    None,
    /// Enum option literals in schema order.
    Options(Vec<String>),
    /// Relation target.
    Relation(RelationTarget),
}

/// Target of a relation property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationTarget {
    /// Target collection name.
    Resolved(String),
    /// The referenced collection id matched no known collection.
    Unresolved {
        /// Raw collection id from the schema.
        collection_id: String,
    },
}

/// Resolved property of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Field name.
    pub name: String,
    /// Name of the collection owning the field.
    pub owner_collection: String,
    /// Whether the field may be left empty.
    pub optional: bool,
    /// Semantic kind.
    pub kind: PropertyKind,
    /// Whether the field holds several values.
    pub is_array: bool,
    /// Kind-specific payload.
    pub data: PropertyData,
}

impl Property {
    /// Creates a required scalar property.
    ///
    /// Enum properties start with an empty option list and relation
    /// properties start unresolved.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner_collection: impl Into<String>,
        kind: PropertyKind,
    ) -> Self {
        let data = match kind {
            PropertyKind::Enum => PropertyData::Options(Vec::new()),
            PropertyKind::Relation => PropertyData::Relation(RelationTarget::Unresolved {
                collection_id: String::new(),
            }),
            _ => PropertyData::None,
        };

        Self {
            name: name.into(),
            owner_collection: owner_collection.into(),
            optional: false,
            kind,
            is_array: false,
            data,
        }
    }

    /// Sets whether the property is optional.
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Sets whether the property holds several values.
    #[must_use]
    pub fn array(mut self, is_array: bool) -> Self {
        self.is_array = is_array;
        self
    }

    /// Sets the enum option literals.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data = PropertyData::Options(options.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the relation target.
    #[must_use]
    pub fn with_relation(mut self, target: RelationTarget) -> Self {
        self.data = PropertyData::Relation(target);
        self
    }

    /// Returns the enum option literals (empty for non-enum properties).
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.data {
            PropertyData::Options(options) => options,
            _ => &[],
        }
    }

    /// Returns the resolved relation target collection name.
    #[must_use]
    pub fn relation_target(&self) -> Option<&str> {
        match &self.data {
            PropertyData::Relation(RelationTarget::Resolved(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is an enum property.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.kind == PropertyKind::Enum
    }

    /// Returns true if this is a relation property.
    #[must_use]
    pub fn is_relation(&self) -> bool {
        self.kind == PropertyKind::Relation
    }

    /// Returns the synthesized enum type name (`<Collection><Field>Options`).
    #[must_use]
    pub fn enum_type_name(&self) -> String {
        to_pascal_case(&format!("{}_{}_options", self.owner_collection, self.name))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = vec![self.kind.as_str().to_string()];

        if self.optional {
            data.push("Optional".to_string());
        }

        if self.is_array {
            data.push("Array".to_string());
        }

        match &self.data {
            PropertyData::Relation(RelationTarget::Resolved(name)) => {
                data.push(format!("Relation to {}", name));
            }
            PropertyData::Relation(RelationTarget::Unresolved { .. }) => {
                data.push("Relation to unknown (object)".to_string());
            }
            PropertyData::Options(options) => {
                data.push(format!("Enum Data [{}]", options.join(", ")));
            }
            PropertyData::None => {}
        }

        write!(f, "{} ({})", self.name, data.join(", "))
    }
}

/// Interpreted collection: the raw record plus its resolved properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionModel {
    collection: RawCollection,
    properties: Vec<Property>,
}

impl CollectionModel {
    /// Creates a collection model.
    #[must_use]
    pub fn new(collection: RawCollection, properties: Vec<Property>) -> Self {
        Self {
            collection,
            properties,
        }
    }

    /// Returns the raw collection.
    #[must_use]
    pub fn collection(&self) -> &RawCollection {
        &self.collection
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.collection.name
    }

    /// Returns the properties in schema order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Iterates over relation properties in schema order.
    pub fn relations(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.is_relation())
    }

    /// Returns true if at least one property is a relation.
    #[must_use]
    pub fn has_relations(&self) -> bool {
        self.relations().next().is_some()
    }

    /// Returns enum properties, one per field name, in schema order.
    #[must_use]
    pub fn distinct_enums(&self) -> Vec<&Property> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .filter(|p| p.is_enum() && seen.insert(p.name.as_str()))
            .collect()
    }
}

/// Options controlling which fields become properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpretOptions {
    /// Keep fields hidden from API responses.
    pub include_hidden: bool,
    /// Field names the target already provides implicitly.
    pub excluded_fields: Vec<String>,
}

impl InterpretOptions {
    /// Creates default options (hidden fields skipped, nothing excluded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps or skips hidden fields.
    #[must_use]
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Excludes a field by name.
    #[must_use]
    pub fn exclude_field(mut self, name: impl Into<String>) -> Self {
        self.excluded_fields.push(name.into());
        self
    }

    fn skips(&self, field: &RawField) -> bool {
        (field.hidden && !self.include_hidden) || self.excluded_fields.contains(&field.name)
    }
}

/// Problem recovered while interpreting a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The relation's collection id matched no collection.
    UnresolvedRelation {
        /// Raw collection id.
        collection_id: String,
    },
    /// The relation target exists but is not part of the selection.
    RelationTargetNotSelected {
        /// Target collection name.
        target: String,
    },
    /// A select field carries no values.
    MissingEnumValues,
}

/// Recovered interpretation problem, tied to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Collection name.
    pub collection: String,
    /// Field name.
    pub field: String,
    /// What went wrong.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnresolvedRelation { collection_id } => write!(
                f,
                "{}.{}: relation to unknown collection id '{}', falling back to object",
                self.collection, self.field, collection_id
            ),
            DiagnosticKind::RelationTargetNotSelected { target } => write!(
                f,
                "{}.{}: relation target '{}' is not selected for generation",
                self.collection, self.field, target
            ),
            DiagnosticKind::MissingEnumValues => write!(
                f,
                "{}.{}: select field without values, generating an empty enum",
                self.collection, self.field
            ),
        }
    }
}

/// Result of an interpretation run.
#[derive(Debug, Clone, Default)]
pub struct Interpretation {
    /// Collection models in selection order.
    pub models: Vec<CollectionModel>,
    /// Recovered problems in encounter order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds collection models from raw collections.
#[derive(Debug, Clone)]
pub struct Interpreter<'a> {
    names_by_id: HashMap<&'a str, &'a str>,
    options: InterpretOptions,
}

impl<'a> Interpreter<'a> {
    /// Creates an interpreter resolving relations against `all`.
    #[must_use]
    pub fn new(all: &'a [RawCollection]) -> Self {
        let mut names_by_id = HashMap::with_capacity(all.len());
        for collection in all {
            names_by_id
                .entry(collection.id.as_str())
                .or_insert(collection.name.as_str());
        }

        Self {
            names_by_id,
            options: InterpretOptions::default(),
        }
    }

    /// Sets the interpret options.
    #[must_use]
    pub fn with_options(mut self, options: InterpretOptions) -> Self {
        self.options = options;
        self
    }

    /// Interprets the selected collections, preserving their order.
    #[must_use]
    pub fn interpret<'c, I>(&self, selected: I) -> Interpretation
    where
        I: IntoIterator<Item = &'c RawCollection>,
    {
        let selected: Vec<&RawCollection> = selected.into_iter().collect();
        let selected_names: HashSet<&str> = selected.iter().map(|c| c.name.as_str()).collect();

        let mut interpretation = Interpretation::default();

        for collection in selected {
            let model = self.interpret_collection(
                collection,
                &selected_names,
                &mut interpretation.diagnostics,
            );
            interpretation.models.push(model);
        }

        interpretation
    }

    fn interpret_collection(
        &self,
        collection: &RawCollection,
        selected_names: &HashSet<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> CollectionModel {
        let properties = collection
            .fields
            .iter()
            .filter(|field| !self.options.skips(field))
            .map(|field| self.interpret_field(collection, field, selected_names, diagnostics))
            .collect::<Vec<_>>();

        tracing::debug!(
            "Interpreted collection {} ({} properties)",
            collection.name,
            properties.len()
        );

        CollectionModel::new(collection.clone(), properties)
    }

    fn interpret_field(
        &self,
        collection: &RawCollection,
        field: &RawField,
        selected_names: &HashSet<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Property {
        let kind = field.kind();
        let mut property = Property::new(&field.name, &collection.name, kind)
            .optional(!field.required)
            .array(kind.supports_multiple() && field.max_select > 1);

        let mut report = |kind: DiagnosticKind| {
            let diagnostic = Diagnostic {
                collection: collection.name.clone(),
                field: field.name.clone(),
                kind,
            };
            tracing::warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        };

        match kind {
            PropertyKind::Enum => {
                if field.values.is_empty() {
                    report(DiagnosticKind::MissingEnumValues);
                }
                property = property.with_options(field.values.iter().cloned());
            }
            PropertyKind::Relation => {
                let target = match self.names_by_id.get(field.collection_id.as_str()) {
                    Some(name) => {
                        if !selected_names.contains(name) {
                            report(DiagnosticKind::RelationTargetNotSelected {
                                target: name.to_string(),
                            });
                        }
                        RelationTarget::Resolved(name.to_string())
                    }
                    None => {
                        report(DiagnosticKind::UnresolvedRelation {
                            collection_id: field.collection_id.clone(),
                        });
                        RelationTarget::Unresolved {
                            collection_id: field.collection_id.clone(),
                        }
                    }
                };
                property = property.with_relation(target);
            }
            _ => {}
        }

        property
    }
}

/// Interprets `selected` against `all` with default options.
#[must_use]
pub fn interpret<'c, I>(selected: I, all: &[RawCollection]) -> Vec<CollectionModel>
where
    I: IntoIterator<Item = &'c RawCollection>,
{
    Interpreter::new(all).interpret(selected).models
}

/// Converts a string to PascalCase.
///
/// Word boundaries are `_`, `-`, `.`, spaces and digits; characters that are
/// not ASCII alphanumeric are dropped so the result is identifier-safe.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.trim().chars() {
        if c.is_ascii_alphabetic() {
            if capitalize_next {
                result.push(c.to_ascii_uppercase());
            } else {
                result.push(c);
            }
            capitalize_next = false;
        } else if c.is_ascii_digit() {
            result.push(c);
            capitalize_next = true;
        } else {
            capitalize_next = matches!(c, '_' | '-' | '.' | ' ');
        }
    }

    result
}

/// Converts a string to camelCase.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}
