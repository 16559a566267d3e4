//! Schema type definitions.
//!
//! This module contains the raw collection and field records exactly as the
//! PocketBase collections API returns them, plus the closed set of property
//! kinds every field type tag is classified into.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Raw field definition of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    /// Field identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Field name.
    pub name: String,
    /// Field type tag (`text`, `number`, `select`, ...).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub field_type: String,
    /// Whether a value is required.
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    /// Target collection id (relation fields only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub collection_id: String,
    /// Maximum number of values (select, relation and file fields).
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_select: u32,
    /// Allowed values (select fields only).
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<String>,
    /// Whether the field is hidden from API responses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hidden: bool,
}

impl RawField {
    /// Creates a new field with the given name and type tag.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the field identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the relation target collection id.
    #[must_use]
    pub fn with_collection_id(mut self, collection_id: impl Into<String>) -> Self {
        self.collection_id = collection_id.into();
        self
    }

    /// Sets the maximum number of values.
    #[must_use]
    pub fn with_max_select(mut self, max_select: u32) -> Self {
        self.max_select = max_select;
        self
    }

    /// Sets the allowed select values.
    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the field as hidden.
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Returns the classified property kind of this field.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        classify(&self.field_type)
    }
}

/// Raw collection definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawCollection {
    /// Collection identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Collection name.
    pub name: String,
    /// Collection flavour.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub collection_type: CollectionType,
    /// Whether this is a PocketBase system collection.
    #[serde(default, deserialize_with = "null_as_default")]
    pub system: bool,
    /// Ordered field definitions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<RawField>,
}

impl RawCollection {
    /// Creates a new base collection.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Marks the collection as a system collection.
    #[must_use]
    pub fn system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    /// Sets the collection flavour.
    #[must_use]
    pub fn with_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = collection_type;
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: RawField) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&RawField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl fmt::Display for RawCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.system {
            write!(f, "{} (System, {} fields)", self.name, self.fields.len())
        } else {
            write!(f, "{} ({} fields)", self.name, self.fields.len())
        }
    }
}

/// Collection flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    /// Regular collection.
    #[default]
    Base,
    /// Auth collection (users, superusers).
    Auth,
    /// Read-only view collection.
    View,
    /// Any flavour this crate does not know about.
    #[serde(other)]
    Other,
}

/// Response envelope of the collections list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsResponse {
    /// Current page (1-based).
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    /// Page size.
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_page: u32,
    /// Total number of collections.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_items: u32,
    /// Total number of pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    /// Collections on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawCollection>,
}

/// Closed set of semantic property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Text-like value (also the fallback for unknown tags).
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
    /// Arbitrary JSON value.
    Json,
    /// File name(s).
    File,
    /// One of a fixed set of string literals.
    Enum,
    /// Reference to a record of another collection.
    Relation,
    /// Date/time value.
    Date,
}

impl PropertyKind {
    /// Parses a property kind from a field type tag.
    ///
    /// Total: unknown tags fall back to [`PropertyKind::String`].
    #[must_use]
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "number" => Self::Number,
            "bool" => Self::Boolean,
            "select" => Self::Enum,
            "json" => Self::Json,
            "file" => Self::File,
            "relation" => Self::Relation,
            "date" | "autodate" => Self::Date,
            _ => Self::String,
        }
    }

    /// Returns the display name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Json => "Json",
            Self::File => "File",
            Self::Enum => "Enum",
            Self::Relation => "Relation",
            Self::Date => "Date",
        }
    }

    /// Returns true if fields of this kind can hold several values.
    #[must_use]
    pub const fn supports_multiple(&self) -> bool {
        matches!(self, Self::Enum | Self::Relation | Self::File)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a raw field type tag.
#[must_use]
pub fn classify(tag: &str) -> PropertyKind {
    PropertyKind::from_type_tag(tag)
}

/// Deserializes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_known_tags() {
        assert_eq!(classify("number"), PropertyKind::Number);
        assert_eq!(classify("bool"), PropertyKind::Boolean);
        assert_eq!(classify("select"), PropertyKind::Enum);
        assert_eq!(classify("json"), PropertyKind::Json);
        assert_eq!(classify("file"), PropertyKind::File);
        assert_eq!(classify("relation"), PropertyKind::Relation);
        assert_eq!(classify("date"), PropertyKind::Date);
        assert_eq!(classify("autodate"), PropertyKind::Date);
    }

    #[test]
    fn test_classify_string_like_tags() {
        for tag in ["text", "email", "url", "editor", "password", "geoPoint", ""] {
            assert_eq!(classify(tag), PropertyKind::String, "tag {tag:?}");
        }
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify("Number"), PropertyKind::String);
        assert_eq!(classify("RELATION"), PropertyKind::String);
    }

    #[test]
    fn test_property_kind_display() {
        assert_eq!(PropertyKind::Enum.to_string(), "Enum");
        assert_eq!(PropertyKind::Relation.as_str(), "Relation");
    }

    #[test]
    fn test_supports_multiple() {
        assert!(PropertyKind::Enum.supports_multiple());
        assert!(PropertyKind::File.supports_multiple());
        assert!(!PropertyKind::Number.supports_multiple());
        assert!(!PropertyKind::Json.supports_multiple());
    }

    #[test]
    fn test_collection_display() {
        let users = RawCollection::new("_pb_users_auth_", "users")
            .with_field(RawField::new("email", "email"))
            .with_field(RawField::new("name", "text"));
        assert_eq!(users.to_string(), "users (2 fields)");

        let superusers = RawCollection::new("pbc_3142635823", "_superusers").system(true);
        assert_eq!(superusers.to_string(), "_superusers (System, 0 fields)");
    }

    #[test]
    fn test_field_deserialize_with_nulls() {
        let json = r#"{
            "id": "select123",
            "name": "status",
            "type": "select",
            "required": false,
            "maxSelect": null,
            "values": null
        }"#;

        let field: RawField = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(field.name, "status");
        assert_eq!(field.kind(), PropertyKind::Enum);
        assert_eq!(field.max_select, 0);
        assert!(field.values.is_empty());
        assert!(!field.hidden);
    }

    #[test]
    fn test_collection_type_unknown_flavour() {
        let json = r#"{"id": "x", "name": "x", "type": "graph"}"#;
        let collection: RawCollection = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(collection.collection_type, CollectionType::Other);
        assert!(collection.fields.is_empty());
    }

    proptest! {
        #[test]
        fn proptest_classify_is_total(tag in ".*") {
            let kind = classify(&tag);
            let known = ["number", "bool", "select", "json", "file", "relation", "date", "autodate"];
            if !known.contains(&tag.as_str()) {
                prop_assert_eq!(kind, PropertyKind::String);
            }
        }

        #[test]
        fn proptest_classify_is_pure(tag in "[a-zA-Z]{0,12}") {
            prop_assert_eq!(classify(&tag), classify(&tag));
        }
    }
}
