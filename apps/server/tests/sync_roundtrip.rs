//! Two-way sync tests running two complete server instances on ephemeral
//! ports, talking to each other exactly as deployed replicas would.

mod common;

use common::*;
use serde_json::{json, Value};

async fn product_names(server: &TestServer) -> Vec<String> {
    server
        .get_json("/api/products")
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn trigger_runs_the_two_way_exchange() {
    let remote = TestServer::spawn().await;
    let local = TestServer::spawn_with_remote(Some(remote.base_url())).await;

    // local: two products, a partner and a sale; remote: one product of its own
    let mouse = create_product(&local, "Wireless Mouse", "MS-001", "10.00", "25.00", 50).await;
    create_product(&local, "Mechanical Keyboard", "KB-002", "40.00", "90.00", 20).await;
    create_partner(&local, "Walk-in Customer", "customer").await;
    create_product(&remote, "Desk Lamp", "DL-010", "6.00", "15.00", 12).await;

    let sale = local
        .post(
            "/api/transactions",
            json!({
                "type": "sale",
                "userId": "u-1",
                "items": [{ "productId": id_of(&mouse), "quantity": 2, "price": "25.00" }],
            }),
        )
        .await;
    assert_eq!(sale.status(), 201);
    let sale: Value = sale.json().await.unwrap();
    let sale_id = sale["id"].as_str().unwrap();

    let triggered = local.post("/api/sync/trigger", json!({})).await;
    assert_eq!(triggered.status(), 200);
    let outcome: Value = triggered.json().await.unwrap();
    assert_eq!(outcome["pushed"]["products"], 2);
    assert_eq!(outcome["pushed"]["partners"], 1);
    assert_eq!(outcome["pushed"]["transactions"], 1);
    // the pull leg reports the peer's full state after it applied ours
    assert_eq!(outcome["pulled"]["products"], 3);
    assert_eq!(outcome["pulled"]["transactions"], 1);

    // both sides converge on three products and the one sale
    let mut local_names = product_names(&local).await;
    let mut remote_names = product_names(&remote).await;
    local_names.sort();
    remote_names.sort();
    assert_eq!(local_names, remote_names);
    assert_eq!(local_names.len(), 3);

    let remote_sale = remote.get(&format!("/api/transactions/{sale_id}")).await;
    assert_eq!(remote_sale.status(), 200);

    // remote stock arrived through the product rows
    let remote_products = remote.get_json("/api/products?search=MS-001").await;
    assert_eq!(remote_products[0]["quantity"], 48);

    let status = local.get_json("/api/sync/status").await;
    assert_eq!(status["status"], "success");
    assert!(status.get("lastSync").is_some());
}

#[tokio::test]
async fn repeated_triggers_are_idempotent() {
    let remote = TestServer::spawn().await;
    let local = TestServer::spawn_with_remote(Some(remote.base_url())).await;

    let cable = create_product(&local, "USB-C Cable", "CB-003", "2.00", "9.99", 100).await;
    let sale = local
        .post(
            "/api/transactions",
            json!({
                "type": "sale",
                "userId": "u-1",
                "items": [{ "productId": id_of(&cable), "quantity": 1, "price": "9.99" }],
            }),
        )
        .await;
    assert_eq!(sale.status(), 201);

    for _ in 0..2 {
        let triggered = local.post("/api/sync/trigger", json!({})).await;
        assert_eq!(triggered.status(), 200);
    }

    // replaying the same snapshot created no duplicates on either side
    assert_eq!(product_names(&remote).await, vec!["USB-C Cable"]);
    assert_eq!(product_names(&local).await, vec!["USB-C Cable"]);
    assert_eq!(
        remote.get_json("/api/transactions").await.as_array().unwrap().len(),
        1
    );
    assert_eq!(
        local.get_json("/api/transactions").await.as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn name_match_reconciles_without_duplicating() {
    let remote = TestServer::spawn().await;
    let local = TestServer::spawn_with_remote(Some(remote.base_url())).await;

    create_product(&local, "USB-C Cable", "CB-003", "2.00", "9.99", 30).await;
    // same name exists remotely under a different id with stale fields
    let theirs = create_product(&remote, "USB-C Cable", "CB-900", "1.50", "7.50", 5).await;
    let their_id = id_of(&theirs);

    let triggered = local.post("/api/sync/trigger", json!({})).await;
    assert_eq!(triggered.status(), 200);

    // one row per side, fields overwritten by the pushed copy, local id kept
    let remote_products = remote.get_json("/api/products").await;
    let remote_products = remote_products.as_array().unwrap();
    assert_eq!(remote_products.len(), 1);
    assert_eq!(remote_products[0]["id"], their_id.as_str());
    assert_eq!(remote_products[0]["sellingPrice"], "9.99");
    assert_eq!(remote_products[0]["quantity"], 30);

    let local_products = local.get_json("/api/products").await;
    assert_eq!(local_products.as_array().unwrap().len(), 1);
    assert_eq!(local_products[0]["sellingPrice"], "9.99");
}

#[tokio::test]
async fn trigger_without_a_remote_is_rejected() {
    let server = TestServer::spawn().await;

    let triggered = server.post("/api/sync/trigger", json!({})).await;
    assert_eq!(triggered.status(), 400);
    let body: Value = triggered.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION");

    // nothing ran, so the status never left idle
    let status = server.get_json("/api/sync/status").await;
    assert_eq!(status["status"], "idle");
    assert!(status.get("lastSync").is_none());
}

#[tokio::test]
async fn unreachable_peer_surfaces_transport_error() {
    let server = TestServer::spawn().await;
    // configure the remote through settings rather than server config
    let updated = server
        .put("/api/settings", json!({ "remoteUrl": "http://127.0.0.1:9" }))
        .await;
    assert_eq!(updated.status(), 200);

    let triggered = server.post("/api/sync/trigger", json!({})).await;
    assert_eq!(triggered.status(), 502);
    let body: Value = triggered.json().await.unwrap();
    assert_eq!(body["code"], "SYNC_FAILED");

    let status = server.get_json("/api/sync/status").await;
    assert_eq!(status["status"], "error");
    assert!(status.get("lastError").is_some());
}

#[tokio::test]
async fn process_endpoint_applies_a_snapshot_and_answers_with_state() {
    let origin = TestServer::spawn().await;
    let receiver = TestServer::spawn().await;

    create_product(&origin, "Wireless Mouse", "MS-001", "10.00", "25.00", 50).await;
    create_partner(&origin, "Walk-in Customer", "customer").await;
    let snapshot = json!({
        "products": origin.get_json("/api/products").await,
        "partners": origin.get_json("/api/partners").await,
        "transactions": origin.get_json("/api/transactions").await,
    });

    let response = receiver.post("/api/sync/process", snapshot).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["receivedCount"]["products"], 1);
    assert_eq!(body["receivedCount"]["partners"], 1);
    assert_eq!(body["receivedCount"]["transactions"], 0);
    assert_eq!(body["currentState"]["products"].as_array().unwrap().len(), 1);

    assert_eq!(product_names(&receiver).await, vec!["Wireless Mouse"]);
}
