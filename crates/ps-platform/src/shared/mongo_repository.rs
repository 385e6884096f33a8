//! MongoDB repository
//!
//! Entities go through `serde_json::Value` on the way in and out, so UUIDs
//! and timestamps are stored as strings and filters compare like-for-like
//! with the in-memory store.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{doc, Bson, Document, Regex};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Collection, Database};
use uuid::Uuid;

use crate::shared::error::{PlatformError, Result};
use crate::shared::repository::{Filter, HasId, Repository};

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoRepository<T> {
    collection: Collection<Document>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: HasId> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(T::collection_name()),
            _marker: PhantomData,
        }
    }

    fn encode(item: &T) -> Result<Document> {
        let value = serde_json::to_value(item)?;
        Ok(bson::to_document(&value)?)
    }

    fn decode(document: Document) -> Result<T> {
        let value = Bson::Document(document).into_relaxed_extjson();
        Ok(serde_json::from_value(value)?)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn case_insensitive(value: &str) -> Bson {
    Bson::RegularExpression(Regex {
        pattern: format!("^{}$", regex::escape(value)),
        options: "i".to_string(),
    })
}

/// Translate a [`Filter`] into a MongoDB query document.
pub fn filter_to_document(filter: &Filter) -> Result<Document> {
    Ok(match filter {
        Filter::All => doc! {},
        Filter::Eq(field, value) => {
            let mut query = Document::new();
            query.insert(field.as_str(), bson::to_bson(value)?);
            query
        }
        Filter::Ne(field, value) => {
            let mut query = Document::new();
            query.insert(field.as_str(), doc! { "$ne": bson::to_bson(value)? });
            query
        }
        Filter::EqIgnoreCase(field, value) => {
            let mut query = Document::new();
            query.insert(field.as_str(), case_insensitive(value));
            query
        }
        Filter::InIgnoreCase(field, values) => {
            let patterns: Vec<Bson> = values.iter().map(|v| case_insensitive(v)).collect();
            let mut query = Document::new();
            query.insert(field.as_str(), doc! { "$in": patterns });
            query
        }
        Filter::Contains(field, value) => {
            // Equality on an array field matches any element
            let mut query = Document::new();
            query.insert(field.as_str(), bson::to_bson(value)?);
            query
        }
        Filter::And(filters) if filters.is_empty() => doc! {},
        Filter::And(filters) => {
            let clauses = filters
                .iter()
                .map(filter_to_document)
                .collect::<Result<Vec<_>>>()?;
            doc! { "$and": clauses }
        }
    })
}

#[async_trait]
impl<T: HasId> Repository<T> for MongoRepository<T> {
    async fn get_item(&self, id: Uuid) -> Result<Option<T>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        found.map(Self::decode).transpose()
    }

    async fn get_items(&self, filter: &Filter) -> Result<Vec<T>> {
        let cursor = self.collection.find(filter_to_document(filter)?).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        documents.into_iter().map(Self::decode).collect()
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

        match self.collection.insert_one(Self::encode(&item)?).await {
            Ok(_) => Ok(item),
            Err(e) if is_duplicate_key(&e) => Err(PlatformError::duplicate(
                T::entity_name(),
                "unique index",
                id.to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_item(&self, id: Uuid, mut item: T) -> Result<T> {
        item.set_id(id);
        let result = match self
            .collection
            .replace_one(doc! { "_id": id.to_string() }, Self::encode(&item)?)
            .await
        {
            Ok(result) => result,
            Err(e) if is_duplicate_key(&e) => {
                return Err(PlatformError::duplicate(
                    T::entity_name(),
                    "unique index",
                    id.to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        if result.matched_count == 0 {
            return Err(PlatformError::not_found(T::entity_name(), id.to_string()));
        }
        Ok(item)
    }

    async fn delete_item(&self, id: Uuid) -> Result<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;
        if result.deleted_count == 0 {
            return Err(PlatformError::not_found(T::entity_name(), id.to_string()));
        }
        Ok(())
    }
}
