//! Collection selection policies.
//!
//! Selection decides which collections a generation run emits types for.
//! Relations are still resolved against the complete collection list.

use crate::error::SelectionError;
use crate::types::RawCollection;

/// Chooses the collections to generate code for.
pub trait CollectionSelector {
    /// Returns the selected collections, preserving input order.
    ///
    /// # Errors
    /// Returns `SelectionError` if the selection cannot be made.
    fn select<'a>(
        &self,
        collections: &'a [RawCollection],
    ) -> Result<Vec<&'a RawCollection>, SelectionError>;
}

/// Flag-driven selection policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Select system collections too.
    pub all_collections: bool,
    /// Collection names to include (case-insensitive). Empty means all.
    pub include: Vec<String>,
    /// Collection names to exclude (case-insensitive).
    pub exclude: Vec<String>,
}

impl SelectionPolicy {
    /// Creates the default policy: every non-system collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects system collections too.
    #[must_use]
    pub fn all_collections(mut self, all: bool) -> Self {
        self.all_collections = all;
        self
    }

    /// Adds collection names to the include list.
    #[must_use]
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds collection names to the exclude list.
    #[must_use]
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns true if the collection passes the policy.
    #[must_use]
    pub fn accepts(&self, collection: &RawCollection) -> bool {
        let included = contains_ignore_case(&self.include, &collection.name);

        if !self.include.is_empty() && !included {
            return false;
        }

        if contains_ignore_case(&self.exclude, &collection.name) {
            return false;
        }

        !collection.system || self.all_collections || included
    }

    /// Applies the policy to a collection list.
    #[must_use]
    pub fn apply<'a>(&self, collections: &'a [RawCollection]) -> Vec<&'a RawCollection> {
        for name in &self.include {
            if !collections.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
                tracing::warn!("Included collection '{}' does not exist", name);
            }
        }

        collections.iter().filter(|c| self.accepts(c)).collect()
    }
}

impl CollectionSelector for SelectionPolicy {
    fn select<'a>(
        &self,
        collections: &'a [RawCollection],
    ) -> Result<Vec<&'a RawCollection>, SelectionError> {
        Ok(self.apply(collections))
    }
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|v| v.to_lowercase() == value.to_lowercase())
}
