//! In-process [`Store`] used by tests and local runs without MongoDB.

use async_trait::async_trait;
use mongodb::bson::{Bson, to_document};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Entity, Store};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::geo::GeoPoint;

/// `HashMap`-backed store with the same contract as [`super::MongoStore`].
///
/// Field lookups compare against the entity's BSON encoding, so the values
/// passed to `find_by_field` are the ones a MongoDB filter would use.
pub struct InMemoryStore<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T: Entity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn field_matches<T: Entity>(entity: &T, field: &str, value: &Bson) -> MarketplaceResult<bool> {
    let doc = to_document(entity)?;
    Ok(doc.get(field) == Some(value))
}

#[async_trait]
impl<T: Entity> Store<T> for InMemoryStore<T> {
    async fn find_by_id(&self, id: Uuid) -> MarketplaceResult<Option<T>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_field(&self, field: &str, value: Bson) -> MarketplaceResult<Option<T>> {
        let records = self.records.read().await;
        for entity in records.values() {
            if field_matches(entity, field, &value)? {
                return Ok(Some(entity.clone()));
            }
        }
        Ok(None)
    }

    async fn find_all_by_field(&self, field: &str, value: Bson) -> MarketplaceResult<Vec<T>> {
        let records = self.records.read().await;
        let mut found = Vec::new();
        for entity in records.values() {
            if field_matches(entity, field, &value)? {
                found.push(entity.clone());
            }
        }
        Ok(found)
    }

    async fn insert(&self, entity: &T) -> MarketplaceResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&entity.id()) {
            return Err(MarketplaceError::already_exists::<T>(entity.id()));
        }
        records.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &T) -> MarketplaceResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(&entity.id()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> MarketplaceResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn find_near(&self, center: GeoPoint, radius_meters: f64) -> MarketplaceResult<Vec<T>> {
        let records = self.records.read().await;
        let mut hits: Vec<(f64, T)> = records
            .values()
            .filter_map(|entity| {
                let distance = entity.position()?.distance_meters(&center);
                (distance <= radius_meters).then(|| (distance, entity.clone()))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(hits.into_iter().map(|(_, entity)| entity).collect())
    }
}
