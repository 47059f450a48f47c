use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use super::models::{CreateProduct, Product, UpdateProduct};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::store::{Store, key};

pub struct ProductService<S: Store<Product>> {
    store: Arc<S>,
}

impl<S: Store<Product>> Clone for ProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store<Product>> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.product_name))]
    pub async fn create_product(&self, input: CreateProduct) -> MarketplaceResult<Product> {
        input.validate()?;

        let product = Product::new(input);
        self.store.insert(&product).await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> MarketplaceResult<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found::<Product>(id))
    }

    /// Every product in `category_id`; empty when none.
    #[instrument(skip(self))]
    pub async fn find_by_category(&self, category_id: Uuid) -> MarketplaceResult<Vec<Product>> {
        self.store
            .find_all_by_field("category_id", key::to_bson(category_id))
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> MarketplaceResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_update(input);

        if !self.store.update(&product).await? {
            return Err(MarketplaceError::not_found::<Product>(id));
        }

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> MarketplaceResult<()> {
        self.get_product(id).await?;
        if !self.store.delete(id).await? {
            return Err(MarketplaceError::not_found::<Product>(id));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
