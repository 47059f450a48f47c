//! User Service - registration, lookup and proximity search

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use mongodb::bson::Bson;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use super::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::geo::GeoPoint;
use crate::store::Store;

pub struct UserService<S: Store<User>> {
    store: Arc<S>,
}

impl<S: Store<User>> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store<User>> UserService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Register a user; usernames are unique.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUser) -> MarketplaceResult<UserResponse> {
        input.validate()?;

        if self.find_by_username(&input.username).await?.is_some() {
            return Err(MarketplaceError::already_exists::<User>(input.username));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input, password_hash);
        self.store.insert(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> MarketplaceResult<UserResponse> {
        self.store
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| MarketplaceError::not_found::<User>(id))
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> MarketplaceResult<UserResponse> {
        self.find_by_username(username)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| MarketplaceError::not_found::<User>(username))
    }

    /// Resolve `key` as an id first, then as a username.
    #[instrument(skip(self))]
    pub async fn lookup(&self, key: &str) -> MarketplaceResult<UserResponse> {
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(user) = self.store.find_by_id(id).await? {
                return Ok(user.into());
            }
        }
        self.get_user_by_username(key).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> MarketplaceResult<UserResponse> {
        input.validate()?;

        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found::<User>(id))?;

        if let Some(ref username) = input.username {
            if username != &user.username && self.find_by_username(username).await?.is_some() {
                return Err(MarketplaceError::already_exists::<User>(username));
            }
        }

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        user.apply_update(input, password_hash);

        if !self.store.update(&user).await? {
            return Err(MarketplaceError::not_found::<User>(id));
        }

        tracing::info!(user_id = %id, "User updated");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> MarketplaceResult<()> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(MarketplaceError::not_found::<User>(id));
        }
        if !self.store.delete(id).await? {
            return Err(MarketplaceError::not_found::<User>(id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Users within `radius_meters` of `center`, nearest first.
    #[instrument(skip(self))]
    pub async fn find_nearby(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> MarketplaceResult<Vec<UserResponse>> {
        let users = self.store.find_near(center, radius_meters).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> MarketplaceResult<Option<User>> {
        self.store
            .find_by_field("username", Bson::String(username.to_string()))
            .await
    }
}

fn hash_password(password: &str) -> MarketplaceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MarketplaceError::Internal(format!("Failed to hash password: {e}")))
}
