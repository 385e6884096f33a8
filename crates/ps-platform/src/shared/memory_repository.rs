//! In-memory repository used in dev mode and tests.

use std::marker::PhantomData;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::shared::error::{PlatformError, Result};
use crate::shared::repository::{Filter, HasId, Repository};

/// Stores entities as serialized JSON in insertion order, so filters see
/// exactly what MongoDB would store.
pub struct InMemoryRepository<T> {
    items: RwLock<IndexMap<Uuid, Value>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: HasId> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(IndexMap::new()),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn decode(value: &Value) -> Result<T> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

impl<T: HasId> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: HasId> Repository<T> for InMemoryRepository<T> {
    async fn get_item(&self, id: Uuid) -> Result<Option<T>> {
        self.items.read().get(&id).map(Self::decode).transpose()
    }

    async fn get_items(&self, filter: &Filter) -> Result<Vec<T>> {
        self.items
            .read()
            .values()
            .filter(|doc| filter.matches(doc))
            .map(Self::decode)
            .collect()
    }

    async fn create_item(&self, mut item: T) -> Result<T> {
        let id = match item.id() {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                item.set_id(id);
                id
            }
        };

        let document = serde_json::to_value(&item)?;
        let mut items = self.items.write();
        if items.contains_key(&id) {
            return Err(PlatformError::duplicate(T::entity_name(), "_id", id.to_string()));
        }
        items.insert(id, document);
        Ok(item)
    }

    async fn update_item(&self, id: Uuid, mut item: T) -> Result<T> {
        item.set_id(id);
        let document = serde_json::to_value(&item)?;
        match self.items.write().get_mut(&id) {
            Some(slot) => {
                *slot = document;
                Ok(item)
            }
            None => Err(PlatformError::not_found(T::entity_name(), id.to_string())),
        }
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        match self.items.write().shift_remove(&id) {
            Some(_) => Ok(()),
            None => Err(PlatformError::not_found(T::entity_name(), id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Widget {
        #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
        id: Option<Uuid>,
        name: String,
    }

    impl HasId for Widget {
        fn id(&self) -> Option<Uuid> {
            self.id
        }

        fn set_id(&mut self, id: Uuid) {
            self.id = Some(id);
        }

        fn entity_name() -> &'static str {
            "Widget"
        }

        fn collection_name() -> &'static str {
            "widgets"
        }
    }

    fn widget(name: &str) -> Widget {
        Widget { id: None, name: name.to_string() }
    }

    #[test]
    fn test_create_assigns_id_and_preserves_order() {
        tokio_test::block_on(async {
            let repo = InMemoryRepository::<Widget>::new();
            let first = repo.create_item(widget("a")).await.unwrap();
            let second = repo.create_item(widget("b")).await.unwrap();

            assert!(first.id.is_some());
            let all = repo.get_items(&Filter::All).await.unwrap();
            assert_eq!(all, vec![first, second]);
        });
    }

    #[test]
    fn test_update_and_delete_missing_report_not_found() {
        tokio_test::block_on(async {
            let repo = InMemoryRepository::<Widget>::new();
            let id = Uuid::new_v4();

            assert!(repo.update_item(id, widget("x")).await.unwrap_err().is_not_found());
            assert!(repo.delete_item(id).await.unwrap_err().is_not_found());
            assert!(repo.is_empty());
        });
    }

    #[test]
    fn test_filter_on_serialized_names() {
        tokio_test::block_on(async {
            let repo = InMemoryRepository::<Widget>::new();
            let created = repo.create_item(widget("Gear")).await.unwrap();
            repo.create_item(widget("Bolt")).await.unwrap();

            let found = repo
                .get_items(&Filter::eq_ignore_case("name", "gear"))
                .await
                .unwrap();
            assert_eq!(found, vec![created.clone()]);

            let id = created.id.unwrap();
            let by_id = repo.get_items(&Filter::eq_id("_id", id)).await.unwrap();
            assert_eq!(by_id.len(), 1);
        });
    }
}
