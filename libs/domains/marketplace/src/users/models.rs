use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::geo::GeoPoint;
use crate::store::{Entity, key};

/// User entity as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(with = "key")]
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Argon2 PHC string
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Free-text address
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> String {
        self.username.clone()
    }

    fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

impl User {
    /// Build a new user with a fresh id; `password_hash` must already be hashed.
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: input.username,
            password: password_hash,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            location: input.location,
            latitude: input.latitude,
            longitude: input.longitude,
        }
    }

    /// Apply the supplied fields. The plain-text password in `input` is ignored.
    pub fn apply_update(&mut self, input: UpdateUser, password_hash: Option<String>) {
        if let Some(username) = input.username {
            self.username = username;
        }
        if let Some(hash) = password_hash {
            self.password = hash;
        }
        if let Some(email) = input.email {
            self.email = email;
        }
        if let Some(first_name) = input.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            self.last_name = last_name;
        }
        if let Some(location) = input.location {
            self.location = location;
        }
        if let Some(latitude) = input.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = input.longitude {
            self.longitude = longitude;
        }
    }
}

/// User as returned by the API (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            location: user.location,
            latitude: user.latitude,
            longitude: user.longitude,
        }
    }
}

/// DTO for registering a user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "ravi")]
    pub username: String,
    /// Plain text; hashed before it is stored
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(email)]
    #[schema(example = "ravi@example.com")]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[schema(example = 12.97)]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    #[schema(example = 77.59)]
    pub longitude: f64,
}

/// DTO for a partial user update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 64))]
    pub username: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}
