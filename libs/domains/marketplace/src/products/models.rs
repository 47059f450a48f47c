use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::store::{Entity, key};

/// Product entity - stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(with = "key")]
    pub id: Uuid,
    pub product_name: String,
    pub description: String,
    #[serde(with = "key")]
    pub category_id: Uuid,
    pub price: f64,
    pub stock_quantity: i32,
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";
    const KIND: &'static str = "Product";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_name: input.product_name,
            description: input.description,
            category_id: input.category_id,
            price: input.price,
            stock_quantity: input.stock_quantity,
        }
    }

    pub fn apply_update(&mut self, input: UpdateProduct) {
        if let Some(product_name) = input.product_name {
            self.product_name = product_name;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(category_id) = input.category_id {
            self.category_id = category_id;
        }
        if let Some(price) = input.price {
            self.price = price;
        }
        if let Some(stock_quantity) = input.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
    }
}

/// DTO for listing a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Basmati rice")]
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Uuid,
    #[validate(range(min = 0.0))]
    #[schema(example = 42.5)]
    pub price: f64,
    #[validate(range(min = 0))]
    #[schema(example = 100)]
    pub stock_quantity: i32,
}

/// DTO for a partial product update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,
}
