use mongodb::bson::Bson;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use super::models::{CreateShop, Shop, UpdateShop};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::geo::GeoPoint;
use crate::store::Store;

/// Shop lifecycle; names are unique across shops.
pub struct ShopService<S: Store<Shop>> {
    store: Arc<S>,
}

impl<S: Store<Shop>> Clone for ShopService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store<Shop>> ShopService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[instrument(skip(self, input), fields(shop_name = %input.shop_name))]
    pub async fn create_shop(&self, input: CreateShop) -> MarketplaceResult<Shop> {
        input.validate()?;

        if self.name_taken(&input.shop_name).await? {
            return Err(MarketplaceError::already_exists::<Shop>(input.shop_name));
        }

        let shop = Shop::new(input);
        self.store.insert(&shop).await?;

        tracing::info!(shop_id = %shop.id, "Shop created");
        Ok(shop)
    }

    #[instrument(skip(self))]
    pub async fn get_shop(&self, id: Uuid) -> MarketplaceResult<Shop> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found::<Shop>(id))
    }

    #[instrument(skip(self, input), fields(shop_id = %input.id))]
    pub async fn update_shop(&self, input: UpdateShop) -> MarketplaceResult<Shop> {
        input.validate()?;

        let id = input.id;
        let mut shop = self.get_shop(id).await?;

        if let Some(ref name) = input.shop_name {
            if name != &shop.shop_name && self.name_taken(name).await? {
                return Err(MarketplaceError::already_exists::<Shop>(name));
            }
        }

        shop.apply_update(input);
        if !self.store.update(&shop).await? {
            return Err(MarketplaceError::not_found::<Shop>(id));
        }

        tracing::info!(shop_id = %id, "Shop updated");
        Ok(shop)
    }

    #[instrument(skip(self))]
    pub async fn delete_shop(&self, id: Uuid) -> MarketplaceResult<()> {
        self.get_shop(id).await?;
        if !self.store.delete(id).await? {
            return Err(MarketplaceError::not_found::<Shop>(id));
        }

        tracing::info!(shop_id = %id, "Shop deleted");
        Ok(())
    }

    /// Shops within `radius_meters` of `center`, nearest first.
    #[instrument(skip(self))]
    pub async fn find_nearby(&self, center: GeoPoint, radius_meters: f64) -> MarketplaceResult<Vec<Shop>> {
        self.store.find_near(center, radius_meters).await
    }

    async fn name_taken(&self, name: &str) -> MarketplaceResult<bool> {
        let found = self
            .store
            .find_by_field("shop_name", Bson::String(name.to_string()))
            .await?;
        Ok(found.is_some())
    }
}
