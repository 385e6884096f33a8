//! MongoDB Index Initialization
//!
//! Creates indexes for all collections on application startup.

use mongodb::{Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::info;

/// Initialize all MongoDB indexes
pub async fn initialize_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    info!("Initializing MongoDB indexes...");

    create_user_indexes(db).await?;
    create_user_invite_indexes(db).await?;
    create_group_indexes(db).await?;
    create_event_indexes(db).await?;

    info!("MongoDB indexes initialized successfully");
    Ok(())
}

async fn create_user_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let collection = db.collection::<mongodb::bson::Document>("users");

    // Backs the read-then-write uniqueness checks under concurrent creates
    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
    ).await?;

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "userName": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build(),
    ).await?;

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "ldapId": 1 })
            .options(IndexOptions::builder().sparse(true).build())
            .build(),
    ).await?;

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "tenantId": 1 })
            .build(),
    ).await?;

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "groups": 1 })
            .build(),
    ).await?;

    Ok(())
}

async fn create_user_invite_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let collection = db.collection::<mongodb::bson::Document>("userInvites");

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "email": 1 })
            .build(),
    ).await?;

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "tenantId": 1 })
            .build(),
    ).await?;

    Ok(())
}

async fn create_group_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let collection = db.collection::<mongodb::bson::Document>("groups");

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "tenantId": 1, "name": 1 })
            .build(),
    ).await?;

    Ok(())
}

async fn create_event_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let collection = db.collection::<mongodb::bson::Document>("events");

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "subject": 1, "time": -1 })
            .build(),
    ).await?;

    collection.create_index(
        IndexModel::builder()
            .keys(doc! { "correlationId": 1 })
            .build(),
    ).await?;

    Ok(())
}
