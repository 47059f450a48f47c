//! MongoDB implementation of [`Store`]

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, from_document, to_document},
    error::{ErrorKind, WriteFailure},
};
use std::future::IntoFuture;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use super::{Entity, Store, key};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::geo::GeoPoint;

/// Field holding the GeoJSON copy of an entity's position.
pub const POSITION_FIELD: &str = "position";

const DUPLICATE_KEY: i32 = 11000;

/// Stores `T` in the collection named by `T::COLLECTION`.
///
/// Every driver call runs under `timeout`; exceeding it yields
/// [`MarketplaceError::Timeout`].
pub struct MongoStore<T> {
    collection: Collection<Document>,
    timeout: Duration,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> MongoStore<T> {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let users: MongoStore<User> = MongoStore::new(&client.database("marketplace"), Duration::from_secs(5));
    /// ```
    pub fn new(db: &Database, timeout: Duration) -> Self {
        Self {
            collection: db.collection::<Document>(T::COLLECTION),
            timeout,
            _entity: PhantomData,
        }
    }

    async fn with_deadline<F, R>(&self, operation: &'static str, call: F) -> MarketplaceResult<R>
    where
        F: IntoFuture<Output = Result<R, mongodb::error::Error>>,
    {
        Ok(self.timed(operation, call).await??)
    }

    /// Like [`Self::with_deadline`] but a unique index violation becomes
    /// [`MarketplaceError::AlreadyExists`] keyed by `entity`.
    async fn write_with_deadline<F, R>(
        &self,
        operation: &'static str,
        entity: &T,
        call: F,
    ) -> MarketplaceResult<R>
    where
        F: IntoFuture<Output = Result<R, mongodb::error::Error>>,
    {
        self.timed(operation, call).await?.map_err(|err| {
            if is_duplicate_key(&err) {
                tracing::info!(
                    collection = T::COLLECTION,
                    key = %entity.unique_key(),
                    "Unique index rejected write"
                );
                MarketplaceError::already_exists::<T>(entity.unique_key())
            } else {
                err.into()
            }
        })
    }

    async fn timed<F, R>(
        &self,
        operation: &'static str,
        call: F,
    ) -> MarketplaceResult<Result<R, mongodb::error::Error>>
    where
        F: IntoFuture<Output = Result<R, mongodb::error::Error>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => Ok(result),
            Err(_) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    operation,
                    timeout = ?self.timeout,
                    "Store call timed out"
                );
                Err(MarketplaceError::Timeout(self.timeout))
            }
        }
    }

    async fn find_many(&self, filter: Document) -> MarketplaceResult<Vec<T>> {
        let docs: Vec<Document> = self
            .with_deadline("find", async {
                self.collection
                    .find(filter)
                    .await?
                    .try_collect::<Vec<Document>>()
                    .await
            })
            .await?;

        docs.into_iter().map(from_stored).collect()
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": key::to_bson(id) }
}

/// Entity → stored document: `id` becomes `_id`, position is added as GeoJSON.
fn to_stored<T: Entity>(entity: &T) -> MarketplaceResult<Document> {
    let mut doc = to_document(entity)?;
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }
    if let Some(point) = entity.position() {
        doc.insert(POSITION_FIELD, point.to_geojson());
    }
    Ok(doc)
}

fn from_stored<T: Entity>(mut doc: Document) -> MarketplaceResult<T> {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }
    doc.remove(POSITION_FIELD);
    Ok(from_document(doc)?)
}

#[async_trait]
impl<T: Entity> Store<T> for MongoStore<T> {
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_id(&self, id: Uuid) -> MarketplaceResult<Option<T>> {
        let found = self
            .with_deadline("find_by_id", self.collection.find_one(id_filter(id)))
            .await?;
        found.map(from_stored).transpose()
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_field(&self, field: &str, value: Bson) -> MarketplaceResult<Option<T>> {
        let mut filter = Document::new();
        filter.insert(field, value);

        let found = self
            .with_deadline("find_by_field", self.collection.find_one(filter))
            .await?;
        found.map(from_stored).transpose()
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_all_by_field(&self, field: &str, value: Bson) -> MarketplaceResult<Vec<T>> {
        let mut filter = Document::new();
        filter.insert(field, value);
        self.find_many(filter).await
    }

    #[instrument(skip(self, entity), fields(collection = T::COLLECTION, id = %entity.id()))]
    async fn insert(&self, entity: &T) -> MarketplaceResult<()> {
        let doc = to_stored(entity)?;
        self.write_with_deadline("insert", entity, self.collection.insert_one(doc))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, entity), fields(collection = T::COLLECTION, id = %entity.id()))]
    async fn update(&self, entity: &T) -> MarketplaceResult<bool> {
        let doc = to_stored(entity)?;
        let result = self
            .write_with_deadline(
                "update",
                entity,
                self.collection.replace_one(id_filter(entity.id()), doc),
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn delete(&self, id: Uuid) -> MarketplaceResult<bool> {
        let result = self
            .with_deadline("delete", self.collection.delete_one(id_filter(id)))
            .await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_near(&self, center: GeoPoint, radius_meters: f64) -> MarketplaceResult<Vec<T>> {
        // $nearSphere already sorts nearest first.
        let filter = doc! {
            "position": {
                "$nearSphere": {
                    "$geometry": center.to_geojson(),
                    "$maxDistance": radius_meters,
                }
            }
        };
        self.find_many(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shops::Shop;
    use crate::users::User;
    use mongodb::Client;
    use mongodb::error::WriteError;

    fn farm() -> Shop {
        Shop {
            id: Uuid::now_v7(),
            shop_name: "Green Farm".into(),
            owner_id: Uuid::now_v7(),
            location: "Bangalore".into(),
            operating_hours: "6-18".into(),
            latitude: 12.9,
            longitude: 77.6,
        }
    }

    #[test]
    fn test_to_stored_moves_id_and_adds_position() {
        let shop = farm();
        let doc = to_stored(&shop).unwrap();

        assert!(doc.get("id").is_none());
        assert_eq!(doc.get("_id"), Some(&key::to_bson(shop.id)));
        assert_eq!(doc.get("owner_id"), Some(&key::to_bson(shop.owner_id)));

        let position = doc.get_document(POSITION_FIELD).unwrap();
        assert_eq!(position, &GeoPoint::new(12.9, 77.6).unwrap().to_geojson());
    }

    #[test]
    fn test_from_stored_restores_entity() {
        let shop = farm();
        let back: Shop = from_stored(to_stored(&shop).unwrap()).unwrap();
        assert_eq!(back, shop);
    }

    #[test]
    fn test_user_position_is_derived() {
        let user = User {
            id: Uuid::now_v7(),
            username: "ravi".into(),
            password: "hash".into(),
            email: "ravi@example.com".into(),
            first_name: String::new(),
            last_name: String::new(),
            location: String::new(),
            latitude: -33.9,
            longitude: 18.4,
        };
        let doc = to_stored(&user).unwrap();
        let coords = doc
            .get_document(POSITION_FIELD)
            .unwrap()
            .get_array("coordinates")
            .unwrap();
        assert_eq!(coords[0].as_f64(), Some(18.4));
        assert_eq!(coords[1].as_f64(), Some(-33.9));
    }

    #[test]
    fn test_id_filter_matches_stored_key() {
        let id = Uuid::now_v7();
        assert_eq!(id_filter(id).get_str("_id").unwrap(), id.to_string());
    }

    fn write_error(code: i32) -> mongodb::error::Error {
        let write: WriteError = from_document(doc! {
            "code": code,
            "errmsg": "E11000 duplicate key error collection: marketplace.users",
        })
        .unwrap();
        ErrorKind::Write(WriteFailure::WriteError(write)).into()
    }

    #[test]
    fn test_duplicate_key_detection() {
        assert!(is_duplicate_key(&write_error(11000)));
        assert!(!is_duplicate_key(&write_error(121)));
        assert!(!is_duplicate_key(&ErrorKind::SessionsNotSupported.into()));
    }

    async fn unreachable_store() -> MongoStore<Shop> {
        // Non-routable address: server selection outlasts the store deadline.
        let client = Client::with_uri_str(
            "mongodb://10.255.255.1:27017/?serverSelectionTimeoutMS=60000&connectTimeoutMS=60000",
        )
        .await
        .unwrap();
        MongoStore::new(&client.database("marketplace"), Duration::from_millis(300))
    }

    #[tokio::test]
    async fn test_calls_fail_with_timeout_past_deadline() {
        let store = unreachable_store().await;
        let started = std::time::Instant::now();

        let err = store.find_by_id(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Timeout(d) if d == Duration::from_millis(300)));

        let err = store
            .find_near(GeoPoint::new(12.9, 77.6).unwrap(), 1_000.0)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Timeout(_)));

        let err = store.insert(&farm()).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Timeout(_)));

        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
