//! Marketplace Domain
//!
//! Users, shops, products and serviceable-product links backed by MongoDB,
//! with proximity search over users and shops.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, one router per entity
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← Existence and uniqueness checks, password hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Store<T>   │  ← One generic adapter (MongoDB or in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use domain_marketplace::{MongoStore, shops::{self, ShopService}};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("marketplace");
//!
//! domain_marketplace::init_indexes(&db).await?;
//!
//! let service = ShopService::new(MongoStore::new(&db, Duration::from_secs(5)));
//! let router = shops::handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geo;
pub mod indexes;
pub mod products;
pub mod serviceable_products;
pub mod shops;
pub mod store;
pub mod users;

pub use error::{MarketplaceError, MarketplaceResult};
pub use geo::{GeoPoint, NearbyParams};
pub use indexes::init_indexes;
pub use store::{Entity, InMemoryStore, MongoStore, Store};
