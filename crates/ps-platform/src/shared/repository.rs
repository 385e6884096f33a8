//! Repository abstraction
//!
//! Every aggregate is stored as one document per entity in its own
//! collection, keyed by `_id`. Queries are expressed with [`Filter`] so the
//! same use case runs against MongoDB or the in-memory store.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::error::Result;

/// Entities that can be stored by a [`Repository`].
pub trait HasId: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> Option<Uuid>;

    fn set_id(&mut self, id: Uuid);

    /// Name used in error messages
    fn entity_name() -> &'static str;

    fn collection_name() -> &'static str;
}

/// Query predicate over stored documents.
///
/// Field names are the serialized (camelCase) names.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Eq(String, Value),
    Ne(String, Value),
    /// Case-insensitive string equality
    EqIgnoreCase(String, String),
    /// Case-insensitive membership in a set of strings
    InIgnoreCase(String, Vec<String>),
    /// Array field contains the value
    Contains(String, Value),
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::Eq(field.to_string(), value.into())
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Self::Ne(field.to_string(), value.into())
    }

    pub fn eq_id(field: &str, id: Uuid) -> Self {
        Self::Eq(field.to_string(), Value::String(id.to_string()))
    }

    pub fn ne_id(field: &str, id: Uuid) -> Self {
        Self::Ne(field.to_string(), Value::String(id.to_string()))
    }

    pub fn eq_ignore_case(field: &str, value: impl Into<String>) -> Self {
        Self::EqIgnoreCase(field.to_string(), value.into())
    }

    pub fn in_ignore_case<I, S>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InIgnoreCase(field.to_string(), values.into_iter().map(Into::into).collect())
    }

    pub fn contains_id(field: &str, id: Uuid) -> Self {
        Self::Contains(field.to_string(), Value::String(id.to_string()))
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Self::And(filters)
    }

    /// Evaluate the filter against a serialized document.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => field_value(document, field) == expected,
            Filter::Ne(field, expected) => field_value(document, field) != expected,
            Filter::EqIgnoreCase(field, expected) => field_value(document, field)
                .as_str()
                .map(|actual| actual.to_lowercase() == expected.to_lowercase())
                .unwrap_or(false),
            Filter::InIgnoreCase(field, candidates) => field_value(document, field)
                .as_str()
                .map(|actual| {
                    let actual = actual.to_lowercase();
                    candidates.iter().any(|c| c.to_lowercase() == actual)
                })
                .unwrap_or(false),
            Filter::Contains(field, expected) => field_value(document, field)
                .as_array()
                .map(|items| items.contains(expected))
                .unwrap_or(false),
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
        }
    }
}

fn field_value<'a>(document: &'a Value, field: &str) -> &'a Value {
    document.get(field).unwrap_or(&Value::Null)
}

/// Document store for one entity type.
///
/// `update_item` and `delete_item` return [`crate::PlatformError::NotFound`]
/// when no document has the given id, so callers can choose to suppress it.
#[async_trait]
pub trait Repository<T: HasId>: Send + Sync {
    async fn get_item(&self, id: Uuid) -> Result<Option<T>>;

    async fn get_items(&self, filter: &Filter) -> Result<Vec<T>>;

    /// Insert a new entity, assigning an id when it has none.
    async fn create_item(&self, item: T) -> Result<T>;

    /// Replace the stored entity with the given id.
    async fn update_item(&self, id: Uuid, item: T) -> Result<T>;

    async fn delete_item(&self, id: Uuid) -> Result<()>;

    async fn exists(&self, filter: &Filter) -> Result<bool> {
        Ok(!self.get_items(filter).await?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_doc() -> Value {
        json!({
            "_id": "5f0c8c52-6d0e-4a53-9a1e-0f3c2f0b9a11",
            "email": "Ann.Lee@Contoso.com",
            "tenantId": "tenant-a",
            "groups": ["g1", "g2"],
            "isLocked": false
        })
    }

    #[test]
    fn test_eq_is_case_sensitive() {
        let doc = user_doc();
        assert!(Filter::eq("email", "Ann.Lee@Contoso.com").matches(&doc));
        assert!(!Filter::eq("email", "ann.lee@contoso.com").matches(&doc));
    }

    #[test]
    fn test_ignore_case_filters() {
        let doc = user_doc();
        assert!(Filter::eq_ignore_case("email", "ann.lee@contoso.com").matches(&doc));
        assert!(Filter::in_ignore_case("email", ["x@y.com", "ANN.LEE@CONTOSO.COM"]).matches(&doc));
        assert!(!Filter::in_ignore_case("email", Vec::<String>::new()).matches(&doc));
    }

    #[test]
    fn test_ne_and_missing_fields() {
        let doc = user_doc();
        assert!(Filter::ne("tenantId", "tenant-b").matches(&doc));
        assert!(Filter::eq("ldapId", Value::Null).matches(&doc));
        assert!(!Filter::eq_ignore_case("ldapId", "").matches(&doc));
    }

    #[test]
    fn test_contains_and_and() {
        let doc = user_doc();
        let filter = Filter::and(vec![
            Filter::Contains("groups".into(), json!("g2")),
            Filter::eq("isLocked", false),
        ]);
        assert!(filter.matches(&doc));
        assert!(!Filter::Contains("groups".into(), json!("g3")).matches(&doc));
        assert!(Filter::and(vec![]).matches(&doc));
    }
}
