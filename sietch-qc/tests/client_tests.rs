//! Session client behaviour against the fake service

mod helpers;

use helpers::{FakeInventory, BOARD_TYPE};
use serde_json::{json, Value};
use sietch_common::records::{BoardData, ComponentRecord};
use sietch_common::{ClientConfig, ComponentKind, Error, InventoryClient, SearchKey};

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let fake = FakeInventory::start().await;
    let config = ClientConfig::from_json_str(
        &json!({"url": fake.base_url, "auth": {"username": "nobody"}}).to_string(),
    )
    .unwrap();

    let err = InventoryClient::login(&config).await.unwrap_err();

    match err {
        Error::Auth(body) => assert_eq!(body, "Invalid credentials"),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_find_unique_outcomes() {
    let fake = FakeInventory::start().await;
    let only = fake.insert_board(1, 1, json!({}));
    fake.insert_board(1, 2, json!({}));
    fake.insert_board(1, 2, json!({}));
    let client = fake.client().await;

    let found = client
        .find_unique(ComponentKind::Board, &SearchKey::board(1, 1))
        .await
        .unwrap();
    assert_eq!(found, only);

    let err = client
        .find_unique(ComponentKind::Board, &SearchKey::board(1, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Ambiguous(_)));

    let err = client
        .find_unique(ComponentKind::Board, &SearchKey::board(1, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_batch_search_ignores_boards() {
    let fake = FakeInventory::start().await;
    fake.insert_board(2, 1, json!({}));
    let client = fake.client().await;

    let hits = client
        .search(ComponentKind::Batch, &SearchKey::batch(2))
        .await
        .unwrap();
    assert!(hits.is_empty());

    let hits = client
        .search(ComponentKind::Board, &SearchKey::batch(2))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_fetch_then_store_posts_only_type_and_data() {
    let fake = FakeInventory::start().await;
    let uuid = fake.insert_board(2, 1, json!({"extra": [1, 2, 3]}));
    let client = fake.client().await;

    let record: ComponentRecord<BoardData> = client.fetch(&uuid).await.unwrap();
    assert_eq!(record.component_type, BOARD_TYPE);
    client.store(&uuid, &record).await.unwrap();

    let stored = fake.component(&uuid).unwrap();
    let keys: Vec<&String> = stored.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["data", "type"]);
    assert_eq!(stored["data"]["extra"], json!([1, 2, 3]));
}

#[tokio::test]
async fn test_fetch_unknown_record_is_transport_error() {
    let fake = FakeInventory::start().await;
    let client = fake.client().await;

    let err = client.fetch::<Value>("missing").await.unwrap_err();

    match err {
        Error::Transport { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "No component missing");
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generated_ids_are_distinct() {
    let fake = FakeInventory::start().await;
    let client = fake.client().await;

    let a = client.generate_component_uuid().await.unwrap();
    let b = client.generate_component_uuid().await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_record_url() {
    let fake = FakeInventory::start().await;
    let client = fake.client().await;

    assert_eq!(
        client.record_url("abc-123"),
        format!("{}/abc-123", fake.base_url)
    );
}
