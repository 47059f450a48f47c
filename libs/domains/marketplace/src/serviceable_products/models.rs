use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::store::{Entity, key};

/// Links a product to a shop that can service it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceableProduct {
    #[serde(with = "key")]
    pub id: Uuid,
    #[serde(with = "key")]
    pub product_id: Uuid,
    #[serde(with = "key")]
    pub shop_id: Uuid,
    pub is_serviceable: bool,
}

impl Entity for ServiceableProduct {
    const COLLECTION: &'static str = "serviceable_products";
    const KIND: &'static str = "ServiceableProduct";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl ServiceableProduct {
    pub fn new(input: CreateServiceableProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id: input.product_id,
            shop_id: input.shop_id,
            is_serviceable: input.is_serviceable,
        }
    }
}

/// DTO for linking a product to a shop
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateServiceableProduct {
    pub product_id: Uuid,
    pub shop_id: Uuid,
    pub is_serviceable: bool,
}
