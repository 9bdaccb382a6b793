//! Shared integration-test harness.
//!
//! Boots the complete application (router, state, in-memory SQLite) on an
//! ephemeral port and talks to it over real HTTP, exactly as a peer
//! instance would.

#![allow(dead_code)]

use std::net::SocketAddr;

use serde_json::{json, Value};
use tradepost_db::{Database, DbConfig};
use tradepost_server::{app, AppState, ServerConfig};

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Boot a server over a fresh in-memory database.
    pub async fn spawn() -> Self {
        Self::spawn_with_remote(None).await
    }

    /// Boot a server whose sync trigger is pinned to `remote_url` by config,
    /// bypassing the settings row.
    pub async fn spawn_with_remote(remote_url: Option<String>) -> Self {
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database");
        let config = ServerConfig {
            port: 0,
            database_path: ":memory:".into(),
            remote_url,
        };
        let state = AppState::new(db, config).expect("app state");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener addr");
        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.expect("serve");
        });

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("POST request")
    }

    pub async fn put(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("PUT request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request")
    }

    /// GET a path and parse the JSON body, asserting 200.
    pub async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert_eq!(response.status(), 200, "GET {path}");
        response.json().await.expect("JSON body")
    }
}

// ====== Fixtures ======

/// Create a product, asserting 201, returning the created entity.
pub async fn create_product(
    server: &TestServer,
    name: &str,
    sku: &str,
    cost: &str,
    selling: &str,
    quantity: i64,
) -> Value {
    let response = server
        .post(
            "/api/products",
            json!({
                "name": name,
                "sku": sku,
                "costPrice": cost,
                "sellingPrice": selling,
                "quantity": quantity,
            }),
        )
        .await;
    assert_eq!(response.status(), 201, "create product {name}");
    response.json().await.expect("product body")
}

/// Create a partner, asserting 201, returning the created entity.
pub async fn create_partner(server: &TestServer, name: &str, kind: &str) -> Value {
    let response = server
        .post("/api/partners", json!({ "name": name, "type": kind }))
        .await;
    assert_eq!(response.status(), 201, "create partner {name}");
    response.json().await.expect("partner body")
}

/// Create a ledger account, asserting 201, returning the created entity.
pub async fn create_account(server: &TestServer, code: &str, name: &str, kind: &str) -> Value {
    let response = server
        .post(
            "/api/accounts",
            json!({ "code": code, "name": name, "type": kind }),
        )
        .await;
    assert_eq!(response.status(), 201, "create account {code}");
    response.json().await.expect("account body")
}

/// Create an employee, asserting 201, returning the created entity.
pub async fn create_employee(server: &TestServer, full_name: &str, salary: &str) -> Value {
    let response = server
        .post(
            "/api/employees",
            json!({ "fullName": full_name, "salary": salary }),
        )
        .await;
    assert_eq!(response.status(), 201, "create employee {full_name}");
    response.json().await.expect("employee body")
}

/// Extract the string id of a created entity.
pub fn id_of(entity: &Value) -> String {
    entity["id"].as_str().expect("entity id").to_string()
}
