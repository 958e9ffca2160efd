use clap::Parser;
use product_store::tooling::cli::Cli;
use product_store::{ApiError, ProductStore, StoreError};
use serde_json::Value;
use tempfile::TempDir;

use crate::cli::support::context_in;

fn command(args: &[&str]) -> product_store::tooling::cli::Commands {
    let mut full = vec!["product-store"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).unwrap().command
}

const ADD_ARGS: [&str; 13] = [
    "add",
    "--title",
    "t",
    "--description",
    "d",
    "--price",
    "200",
    "--thumbnail",
    "img",
    "--code",
    "abc123",
    "--stock",
    "25",
];

#[tokio::test]
async fn add_prints_the_new_record_as_json() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;

    let output = cli.execute(&command(&ADD_ARGS)).await.unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("id").and_then(|v| v.as_str()), Some("_1"));
    assert_eq!(parsed.get("price").and_then(|v| v.as_u64()), Some(200));
    assert_eq!(parsed.get("stock").and_then(|v| v.as_u64()), Some(25));
    assert_eq!(parsed.get("code").and_then(|v| v.as_str()), Some("abc123"));
}

#[tokio::test]
async fn list_json_contract_is_an_array_of_records() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;
    cli.execute(&command(&ADD_ARGS)).await.unwrap();
    cli.execute(&command(&ADD_ARGS)).await.unwrap();

    let output = cli.execute(&command(&["list", "--format", "json"])).await.unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();
    let items = parsed.as_array().expect("list output should be an array");
    assert_eq!(items.len(), 2);
    for item in items {
        assert!(item.get("id").and_then(|v| v.as_str()).is_some());
        assert!(item.get("title").and_then(|v| v.as_str()).is_some());
    }
}

#[tokio::test]
async fn list_text_renders_a_table() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;
    assert_eq!(cli.execute(&command(&["list"])).await.unwrap(), "No products.");

    cli.execute(&command(&ADD_ARGS)).await.unwrap();
    let output = cli.execute(&command(&["list"])).await.unwrap();
    assert!(output.contains("abc123"));
    assert!(output.ends_with("1 product(s)"));
}

#[tokio::test]
async fn update_replaces_and_delete_empties() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;
    cli.execute(&command(&ADD_ARGS)).await.unwrap();

    let output = cli
        .execute(&command(&["update", "_1", "--description", "d2", "--price", "250"]))
        .await
        .unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({ "id": "_1", "description": "d2", "price": 250 })
    );

    cli.execute(&command(&["delete", "_1"])).await.unwrap();
    let output = cli.execute(&command(&["list", "--format", "json"])).await.unwrap();
    assert_eq!(serde_json::from_str::<Value>(&output).unwrap(), serde_json::json!([]));
}

#[tokio::test]
async fn incomplete_add_is_a_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;

    let err = cli
        .execute(&command(&["add", "--title", "only"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Store(StoreError::Validation(_))));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;

    for args in [&["get", "_9"][..], &["delete", "_9"][..], &["update", "_9", "--title", "x"][..]] {
        let err = cli.execute(&command(args)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found: _9");
    }
}

#[tokio::test]
async fn demo_leaves_the_store_as_it_found_it() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;

    let output = cli.execute(&command(&["demo"])).await.unwrap();
    for label in [
        "Initial products:",
        "Product added:",
        "Product updated:",
        "Products after update:",
        "Product by id:",
        "Product deleted:",
        "Products after delete: []",
    ] {
        assert!(output.contains(label), "missing '{}' in demo output", label);
    }
    assert!(cli.store().await.unwrap().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn config_command_prints_toml() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_in(&temp_dir).await;

    let output = cli.execute(&command(&["config"])).await.unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(
        parsed
            .get("store")
            .and_then(|s| s.get("id_policy"))
            .and_then(|v| v.as_str()),
        Some("sequential")
    );
}

#[tokio::test]
async fn config_command_does_not_create_the_store_file() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("nested").join("products.json");
    let mut config = product_store::config::AppConfig::default();
    config.store.data_file = data_file.clone();
    let cli = product_store::tooling::cli::CliContext::new(config);

    cli.execute(&command(&["config"])).await.unwrap();
    assert!(!data_file.exists());
    assert!(!temp_dir.path().join("nested").exists());

    cli.execute(&command(&["list"])).await.unwrap();
    assert!(data_file.exists());
}
