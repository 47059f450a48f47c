use mongodb::bson::Bson;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::models::{CreateServiceableProduct, ServiceableProduct};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::store::Store;

pub struct ServiceableProductService<S: Store<ServiceableProduct>> {
    store: Arc<S>,
}

impl<S: Store<ServiceableProduct>> Clone for ServiceableProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store<ServiceableProduct>> ServiceableProductService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Links currently flagged serviceable.
    #[instrument(skip(self))]
    pub async fn list_serviceable(&self) -> MarketplaceResult<Vec<ServiceableProduct>> {
        self.store
            .find_all_by_field("is_serviceable", Bson::Boolean(true))
            .await
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id, shop_id = %input.shop_id))]
    pub async fn create(
        &self,
        input: CreateServiceableProduct,
    ) -> MarketplaceResult<ServiceableProduct> {
        let link = ServiceableProduct::new(input);
        self.store.insert(&link).await?;

        tracing::info!(serviceable_product_id = %link.id, "Serviceable product created");
        Ok(link)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> MarketplaceResult<()> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(MarketplaceError::not_found::<ServiceableProduct>(id));
        }
        if !self.store.delete(id).await? {
            return Err(MarketplaceError::not_found::<ServiceableProduct>(id));
        }

        tracing::info!(serviceable_product_id = %id, "Serviceable product deleted");
        Ok(())
    }
}
