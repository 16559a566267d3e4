//! Collections document parser.
//!
//! Accepts either the envelope returned by the collections list endpoint
//! (`{"items": [...]}`) or a bare array as produced by the dashboard's
//! "Export collections" action.

use crate::error::ParseError;
use crate::types::{CollectionsResponse, RawCollection};
use serde_json::Value;

/// Parses collection definitions from a JSON string.
///
/// # Arguments
/// * `json` - Collections list response or collections export
///
/// # Returns
/// Collections in document order.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or is neither an array nor
/// an object carrying an `items` array.
pub fn parse_collections(json: &str) -> Result<Vec<RawCollection>, ParseError> {
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(ref map) if map.contains_key("items") => {
            let response: CollectionsResponse = serde_json::from_value(value)?;
            Ok(response.items)
        }
        Value::Object(_) => Err(ParseError::invalid_structure(
            "expected an 'items' array in the collections document",
        )),
        _ => Err(ParseError::invalid_structure(
            "collections document must be an array or an object",
        )),
    }
}

/// Parses collection definitions from a JSON file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_collections_file(path: &std::path::Path) -> Result<Vec<RawCollection>, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_collections(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CollectionType, PropertyKind};

    const LIST_RESPONSE: &str = r#"{
        "page": 1,
        "perPage": 500,
        "totalItems": 2,
        "totalPages": 1,
        "items": [
            {
                "id": "pbc_authors",
                "name": "authors",
                "type": "base",
                "system": false,
                "fields": [
                    {"id": "text3208210256", "name": "id", "type": "text", "required": true, "hidden": false},
                    {"id": "text1579384326", "name": "name", "type": "text", "required": true}
                ]
            },
            {
                "id": "pbc_posts",
                "name": "posts",
                "type": "base",
                "system": false,
                "fields": [
                    {"id": "text724990059", "name": "title", "type": "text", "required": true},
                    {"id": "relation3182418120", "name": "author", "type": "relation",
                     "required": false, "collectionId": "pbc_authors", "maxSelect": 1},
                    {"id": "select2063623452", "name": "status", "type": "select",
                     "required": false, "maxSelect": 1, "values": ["draft", "published", "archived"]}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_list_response() {
        let collections = parse_collections(LIST_RESPONSE).expect("Failed to parse");

        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].name, "authors");
        assert_eq!(collections[1].collection_type, CollectionType::Base);

        let posts = &collections[1];
        let author = posts.get_field("author").expect("author field");
        assert_eq!(author.kind(), PropertyKind::Relation);
        assert_eq!(author.collection_id, "pbc_authors");
        assert_eq!(author.max_select, 1);

        let status = posts.get_field("status").expect("status field");
        assert_eq!(status.values, vec!["draft", "published", "archived"]);
    }

    #[test]
    fn test_parse_export_array() {
        let json = r#"[
            {"id": "_pb_users_auth_", "name": "users", "type": "auth", "system": false,
             "fields": [{"name": "password", "type": "password", "required": true, "hidden": true}]}
        ]"#;

        let collections = parse_collections(json).expect("Failed to parse");
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].collection_type, CollectionType::Auth);
        assert!(collections[0].fields[0].hidden);
    }

    #[test]
    fn test_parse_object_without_items() {
        let err = parse_collections(r#"{"message": "forbidden"}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_parse_scalar_document() {
        let err = parse_collections("42").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_collections("{").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_parse_collections_file_missing() {
        let err = parse_collections_file(std::path::Path::new("/nonexistent/pb_schema.json"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
