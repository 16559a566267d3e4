//! Schema sources.

use crate::error::ClientError;
use pocketgen_schema::RawCollection;
use std::path::PathBuf;

/// Supplies the complete collection list for a generation run.
pub trait SchemaSource {
    /// Returns every collection.
    ///
    /// # Errors
    /// Returns `ClientError` if the collections cannot be obtained.
    fn collections(&mut self) -> Result<Vec<RawCollection>, ClientError>;
}

/// Reads collections from an exported JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSource {
    fn collections(&mut self) -> Result<Vec<RawCollection>, ClientError> {
        let collections = pocketgen_schema::parse_collections_file(&self.path)?;
        tracing::info!(
            "Loaded {} collections from {}",
            collections.len(),
            self.path.display()
        );
        Ok(collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pb_schema.json");
        std::fs::write(
            &path,
            r#"[{"id": "pbc_posts", "name": "posts", "fields": [{"name": "title", "type": "text"}]}]"#,
        )
        .expect("write");

        let collections = FileSource::new(&path).collections().expect("collections");
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].name, "posts");
    }

    #[test]
    fn test_file_source_missing() {
        let err = FileSource::new("/nonexistent/pb_schema.json")
            .collections()
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
