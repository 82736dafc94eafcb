//! Concurrent writers on one table.

use futures_util::future::join_all;
use indicium_store::{Client, ClientOptions};
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn read_disk(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_key_updates_keep_cache_and_disk_in_sync() {
    let dir = TempDir::new().unwrap();
    let client = Client::open(ClientOptions::at(dir.path())).await.unwrap();
    let table = client.create_table("counters").await.unwrap();

    let writers = (0..32).map(|i| {
        let table = Arc::clone(&table);
        tokio::spawn(async move {
            table
                .update("shared", vec![(format!("fields.f{}", i), json!(i))])
                .await
        })
    });

    for result in join_all(writers).await {
        result.unwrap().unwrap();
    }

    let cached = table.get("shared").await.unwrap();
    let fields = cached["fields"].as_object().unwrap();
    assert_eq!(fields.len(), 32);
    assert_eq!(cached, read_disk(&table.path().join("shared.json")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_last_writer_wins_for_a_single_field() {
    let dir = TempDir::new().unwrap();
    let client = Client::open(ClientOptions::at(dir.path())).await.unwrap();
    let table = client.create_table("t").await.unwrap();

    let writers = (0..16).map(|i| {
        let table = Arc::clone(&table);
        tokio::spawn(async move { table.update("k", json!({ "v": i })).await })
    });
    for result in join_all(writers).await {
        result.unwrap().unwrap();
    }

    let cached = table.get("k").await.unwrap();
    assert!(cached["v"].is_i64());
    assert_eq!(cached, read_disk(&table.path().join("k.json")));
}

#[tokio::test]
async fn test_distinct_keys_update_independently() {
    let dir = TempDir::new().unwrap();
    let client = Client::open(ClientOptions::at(dir.path())).await.unwrap();
    let table = client.create_table("t").await.unwrap();

    let results = join_all((0..10).map(|i| {
        let table = Arc::clone(&table);
        async move { table.update(format!("k{}", i), json!({ "i": i })).await }
    }))
    .await;
    assert!(results.iter().all(|r| r.is_ok()));

    let entries = table.entries().unwrap();
    assert_eq!(entries.len(), 10);
    for (key, record) in &entries {
        let i: i64 = key.as_str()[1..].parse().unwrap();
        assert_eq!(record, &json!({ "i": i }));
    }
}
