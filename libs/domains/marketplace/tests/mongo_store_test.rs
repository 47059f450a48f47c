//! MongoStore integration tests
//!
//! These need Docker for the MongoDB container. Run with
//! `cargo test -p domain_marketplace -- --ignored`.

use std::time::Duration;

use domain_marketplace::products::Product;
use domain_marketplace::shops::{CreateShop, Shop, ShopService};
use domain_marketplace::store::key;
use domain_marketplace::users::User;
use domain_marketplace::{GeoPoint, MarketplaceError, MongoStore, Store, init_indexes};
use mongodb::bson::Bson;
use test_utils::{TestDataBuilder, TestMongo};
use uuid::Uuid;

const TIMEOUT: Duration = Duration::from_secs(5);

fn shop(builder: &TestDataBuilder, name: &str, latitude: f64, longitude: f64) -> Shop {
    Shop {
        id: Uuid::now_v7(),
        shop_name: name.to_string(),
        owner_id: builder.id(1),
        location: String::new(),
        operating_hours: "06:00-18:00".to_string(),
        latitude,
        longitude,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_find_update_delete() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("store_crud");
    init_indexes(&db).await.unwrap();
    let store: MongoStore<Shop> = MongoStore::new(&db, TIMEOUT);
    let builder = TestDataBuilder::from_test_name("store_crud");

    let mut farm = shop(&builder, "Green Farm", 12.9, 77.6);
    store.insert(&farm).await.unwrap();

    let found = store.find_by_id(farm.id).await.unwrap();
    assert_eq!(found, Some(farm.clone()));

    let by_name = store
        .find_by_field("shop_name", Bson::String("Green Farm".into()))
        .await
        .unwrap();
    assert_eq!(by_name, Some(farm.clone()));

    let by_owner = store
        .find_all_by_field("owner_id", key::to_bson(farm.owner_id))
        .await
        .unwrap();
    assert_eq!(by_owner.len(), 1);

    farm.operating_hours = "24h".to_string();
    assert!(store.update(&farm).await.unwrap());
    assert_eq!(
        store.find_by_id(farm.id).await.unwrap().unwrap().operating_hours,
        "24h"
    );

    assert!(store.delete(farm.id).await.unwrap());
    assert_eq!(store.find_by_id(farm.id).await.unwrap(), None);
    assert!(!store.delete(farm.id).await.unwrap());
    assert!(!store.update(&farm).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_near_orders_by_distance() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("store_near");
    init_indexes(&db).await.unwrap();
    let store: MongoStore<Shop> = MongoStore::new(&db, TIMEOUT);
    let builder = TestDataBuilder::from_test_name("store_near");

    for (name, latitude) in [("Far", 12.95), ("Near", 12.91), ("Elsewhere", 13.9)] {
        store
            .insert(&shop(&builder, name, latitude, 77.6))
            .await
            .unwrap();
    }

    let center = GeoPoint::new(12.9, 77.6).unwrap();
    let names: Vec<String> = store
        .find_near(center, 10_000.0)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.shop_name)
        .collect();
    assert_eq!(names, vec!["Near", "Far"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_username_index() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("store_unique");
    init_indexes(&db).await.unwrap();
    let store: MongoStore<User> = MongoStore::new(&db, TIMEOUT);

    let user = |id| User {
        id,
        username: "ravi".into(),
        password: "hash".into(),
        email: "ravi@example.com".into(),
        first_name: String::new(),
        last_name: String::new(),
        location: String::new(),
        latitude: 12.97,
        longitude: 77.59,
    };

    let first = user(Uuid::now_v7());
    store.insert(&first).await.unwrap();

    // Same username under a new id: the index backs up the service check.
    let err = store.insert(&user(Uuid::now_v7())).await.unwrap_err();
    assert!(matches!(
        &err,
        MarketplaceError::AlreadyExists { entity: "User", key } if key == "ravi"
    ));
    assert_eq!(err.to_string(), "User 'ravi' already exists");

    // Renaming another user onto a taken name is rejected the same way.
    let mut other = user(Uuid::now_v7());
    other.username = "asha".into();
    store.insert(&other).await.unwrap();
    other.username = "ravi".into();
    let err = store.update(&other).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::AlreadyExists { entity: "User", .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_products_by_category() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("store_category");
    let store: MongoStore<Product> = MongoStore::new(&db, TIMEOUT);
    let builder = TestDataBuilder::from_test_name("store_category");

    let category = builder.id(1);
    for (name, category_id) in [("Rice", category), ("Wheat", category), ("Hoe", builder.id(2))] {
        store
            .insert(&Product {
                id: Uuid::now_v7(),
                product_name: name.into(),
                description: String::new(),
                category_id,
                price: 10.0,
                stock_quantity: 1,
            })
            .await
            .unwrap();
    }

    let found = store
        .find_all_by_field("category_id", key::to_bson(category))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_shop_service_over_mongo() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("service_shops");
    init_indexes(&db).await.unwrap();
    let service = ShopService::new(MongoStore::new(&db, TIMEOUT));
    let builder = TestDataBuilder::from_test_name("service_shops");

    let input = CreateShop {
        shop_name: "Green Farm".into(),
        owner_id: builder.id(1),
        location: String::new(),
        operating_hours: String::new(),
        latitude: 12.9,
        longitude: 77.6,
    };
    let created = service.create_shop(input.clone()).await.unwrap();
    assert_eq!(service.get_shop(created.id).await.unwrap(), created);

    let duplicate = service.create_shop(input).await;
    assert!(matches!(duplicate, Err(MarketplaceError::AlreadyExists { .. })));
}
