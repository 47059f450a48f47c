//! Generic persistence for every marketplace entity.

mod memory;
mod mongodb;

pub use self::memory::InMemoryStore;
pub use self::mongodb::{MongoStore, POSITION_FIELD};

use ::mongodb::bson::Bson;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::MarketplaceResult;
use crate::geo::GeoPoint;

/// A persisted record with a `Uuid` identity.
///
/// Entities serialize their identifier under `id` through [`key`]; stores
/// map it to the backend's primary key.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// MongoDB collection name
    const COLLECTION: &'static str;
    /// Human-readable kind used in error messages
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Value reported when a unique index rejects a write.
    fn unique_key(&self) -> String {
        self.id().to_string()
    }

    /// Location used by [`Store::find_near`]; `None` never matches.
    fn position(&self) -> Option<GeoPoint> {
        None
    }
}

/// Data access for one entity type.
///
/// Absent records are `None` or empty, never errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> MarketplaceResult<Option<T>>;

    /// First record whose `field` equals `value`
    async fn find_by_field(&self, field: &str, value: Bson) -> MarketplaceResult<Option<T>>;

    async fn find_all_by_field(&self, field: &str, value: Bson) -> MarketplaceResult<Vec<T>>;

    async fn insert(&self, entity: &T) -> MarketplaceResult<()>;

    /// Full replace keyed by `entity.id()`; `false` when no record matched.
    async fn update(&self, entity: &T) -> MarketplaceResult<bool>;

    /// `false` when nothing was removed.
    async fn delete(&self, id: Uuid) -> MarketplaceResult<bool>;

    /// Records within `radius_meters` of `center`, nearest first.
    async fn find_near(&self, center: GeoPoint, radius_meters: f64) -> MarketplaceResult<Vec<T>>;
}

/// Serde representation of entity identifiers and references.
///
/// Ids are stored as hyphenated strings so filters built with [`key::to_bson`]
/// match what `#[serde(with = "key")]` wrote.
pub mod key {
    use mongodb::bson::Bson;
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.hyphenated().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }

    pub fn to_bson(id: Uuid) -> Bson {
        Bson::String(id.hyphenated().to_string())
    }
}
