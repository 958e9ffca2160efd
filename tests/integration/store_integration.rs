use product_store::{
    JsonFileProductStore, ProductFields, ProductStore, StoreError, StoreOptions,
};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

fn fields(value: Value) -> ProductFields {
    serde_json::from_value(value).unwrap()
}

fn complete_fields(code: &str) -> ProductFields {
    fields(json!({
        "title": "t",
        "description": "d",
        "price": 200,
        "thumbnail": "img",
        "code": code,
        "stock": 25
    }))
}

fn read_file(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

async fn open(dir: &TempDir) -> JsonFileProductStore {
    JsonFileProductStore::open(dir.path().join("products.json"), StoreOptions::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn end_to_end_add_update_delete() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;
    assert_eq!(read_file(store.path()), json!([]));

    let added = store.add(complete_fields("abc123")).await.unwrap();
    assert!(!added.id.is_empty());
    assert_eq!(
        serde_json::to_value(&added).unwrap(),
        json!({
            "id": added.id,
            "title": "t",
            "description": "d",
            "price": 200,
            "thumbnail": "img",
            "code": "abc123",
            "stock": 25
        })
    );

    store
        .update(&added.id, fields(json!({ "description": "d2", "price": 250 })))
        .await
        .unwrap();
    assert_eq!(
        read_file(store.path()),
        json!([{ "id": added.id, "description": "d2", "price": 250 }])
    );

    let removed = store.delete(&added.id).await.unwrap();
    assert_eq!(removed.id, added.id);
    assert_eq!(read_file(store.path()), json!([]));
}

#[tokio::test]
async fn listing_after_writes_returns_every_record() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;

    let mut added = Vec::new();
    for i in 0..5 {
        added.push(store.add(complete_fields(&format!("code-{}", i))).await.unwrap());
    }

    let reopened = open(&dir).await;
    assert_eq!(reopened.list().await.unwrap(), added);
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;
    for code in ["a", "b", "c"] {
        store.add(complete_fields(code)).await.unwrap();
    }

    let target = store.get_by_id("_2").await.unwrap();
    let removed = store.delete("_2").await.unwrap();
    assert_eq!(removed, target);

    let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["_1".to_string(), "_3".to_string()]);
}

#[tokio::test]
async fn validation_gate_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;
    store.add(complete_fields("keep")).await.unwrap();
    let before = std::fs::read(store.path()).unwrap();

    for missing in ["title", "description", "price", "thumbnail", "code", "stock"] {
        let mut value = serde_json::to_value(complete_fields("x")).unwrap();
        value.as_object_mut().unwrap().remove(missing);

        let err = store.add(fields(value)).await.unwrap_err();
        match err {
            StoreError::Validation(msg) => assert!(msg.contains(missing)),
            other => panic!("expected validation error for {}, got {:?}", missing, other),
        }
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }
}

#[tokio::test]
async fn sequential_ids_continue_after_foreign_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(
        &path,
        r#"[{"id":"_k3j9x2abq","title":"legacy"},{"id":"_5","title":"five"}]"#,
    )
    .unwrap();

    let store = JsonFileProductStore::open(&path, StoreOptions::default())
        .await
        .unwrap();
    let added = store.add(complete_fields("new")).await.unwrap();
    assert_eq!(added.id, "_6");
    assert_eq!(store.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn non_array_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, r#"{"products": []}"#).unwrap();

    let store = JsonFileProductStore::open(&path, StoreOptions::default())
        .await
        .unwrap();
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::StorageRead { .. }));
    assert!(err.to_string().contains("products.json"));
}
