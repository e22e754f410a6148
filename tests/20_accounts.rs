mod common;

use anyhow::Result;
use bank_api::database::Storage;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_account_returns_record_without_password() -> Result<()> {
    let server = common::spawn_server().await?;

    let account = server.create_account("John", "Doe", "secret").await?;

    assert_eq!(account["firstName"], "John");
    assert_eq!(account["lastName"], "Doe");
    assert_eq!(account["balance"], 0);
    assert!(account["id"].as_i64().unwrap() > 0, "generated id should be returned: {}", account);
    assert!(account["bankNumber"].as_i64().is_some());
    assert!(account.get("password").is_none());
    assert!(account.get("encryptedPassword").is_none());

    assert_eq!(server.store.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn list_returns_every_created_account() -> Result<()> {
    let server = common::spawn_server().await?;

    let empty: Vec<Value> = server.client.get(server.url("/account")).send().await?.json().await?;
    assert!(empty.is_empty());

    for name in ["Ann", "Bob", "Cid"] {
        server.create_account(name, "Test", "secret").await?;
    }

    let res = server.client.get(server.url("/account")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let accounts: Vec<Value> = res.json().await?;

    // No ordering guarantee
    let mut names: Vec<String> = accounts
        .iter()
        .map(|a| a["firstName"].as_str().unwrap_or_default().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
    Ok(())
}

#[tokio::test]
async fn malformed_body_gets_error_envelope() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/account"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["error"].as_str().is_some(), "expected error envelope: {}", body);
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/account"))
        .json(&json!({ "firstName": "", "lastName": "Doe", "password": "secret" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn unsupported_method_gets_error_envelope() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.put(server.url("/account")).send().await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "error": "method not allowed: PUT" }));
    Ok(())
}

#[tokio::test]
async fn created_account_is_visible_in_store_by_number() -> Result<()> {
    let server = common::spawn_server().await?;

    let account = server.create_account("John", "Doe", "secret").await?;
    let number = account["bankNumber"].as_i64().unwrap();

    let stored = server.store.get_account_by_number(number).await?;
    assert_eq!(stored.first_name, "John");
    assert!(stored.valid_password("secret"));
    Ok(())
}
