//! Startup index creation. Safe to run on every boot.

use mongodb::{
    Database, IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};
use tracing::info;

use crate::error::MarketplaceResult;
use crate::products::Product;
use crate::serviceable_products::ServiceableProduct;
use crate::shops::Shop;
use crate::store::{Entity, POSITION_FIELD};
use crate::users::User;

fn unique(field: &str, name: &str) -> IndexModel {
    let mut keys = Document::new();
    keys.insert(field, 1);
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(name.to_string())
                .build(),
        )
        .build()
}

fn geo() -> IndexModel {
    let mut keys = Document::new();
    keys.insert(POSITION_FIELD, "2dsphere");
    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .name("idx_position_2dsphere".to_string())
                .build(),
        )
        .build()
}

/// Creates the uniqueness, lookup and `2dsphere` indexes for every collection.
pub async fn init_indexes(db: &Database) -> MarketplaceResult<()> {
    db.collection::<Document>(User::COLLECTION)
        .create_indexes(vec![unique("username", "idx_username_unique"), geo()])
        .await?;

    db.collection::<Document>(Shop::COLLECTION)
        .create_indexes(vec![unique("shop_name", "idx_shop_name_unique"), geo()])
        .await?;

    db.collection::<Document>(Product::COLLECTION)
        .create_index(IndexModel::builder().keys(doc! { "category_id": 1 }).build())
        .await?;

    db.collection::<Document>(ServiceableProduct::COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "is_serviceable": 1 })
                .build(),
        )
        .await?;

    info!("MongoDB indexes initialized");
    Ok(())
}
