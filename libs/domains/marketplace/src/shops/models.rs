use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::geo::GeoPoint;
use crate::store::{Entity, key};

/// Shop entity - stored in the `shops` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Shop {
    #[serde(with = "key")]
    pub id: Uuid,
    /// Unique display name
    pub shop_name: String,
    /// Owning user; not checked against the users collection
    #[serde(with = "key")]
    pub owner_id: Uuid,
    /// Free-text address
    pub location: String,
    pub operating_hours: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Entity for Shop {
    const COLLECTION: &'static str = "shops";
    const KIND: &'static str = "Shop";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> String {
        self.shop_name.clone()
    }

    fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

impl Shop {
    pub fn new(input: CreateShop) -> Self {
        Self {
            id: Uuid::now_v7(),
            shop_name: input.shop_name,
            owner_id: input.owner_id,
            location: input.location,
            operating_hours: input.operating_hours,
            latitude: input.latitude,
            longitude: input.longitude,
        }
    }

    pub fn apply_update(&mut self, input: UpdateShop) {
        if let Some(shop_name) = input.shop_name {
            self.shop_name = shop_name;
        }
        if let Some(owner_id) = input.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(location) = input.location {
            self.location = location;
        }
        if let Some(operating_hours) = input.operating_hours {
            self.operating_hours = operating_hours;
        }
        if let Some(latitude) = input.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = input.longitude {
            self.longitude = longitude;
        }
    }
}

/// DTO for opening a shop
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateShop {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Green Farm")]
    pub shop_name: String,
    pub owner_id: Uuid,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    #[schema(example = "06:00-18:00")]
    pub operating_hours: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[schema(example = 12.9)]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[schema(example = 77.6)]
    pub longitude: f64,
}

/// DTO for a partial shop update; the target is named by `id`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateShop {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub shop_name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub location: Option<String>,
    pub operating_hours: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl UpdateShop {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            shop_name: None,
            owner_id: None,
            location: None,
            operating_hours: None,
            latitude: None,
            longitude: None,
        }
    }
}
