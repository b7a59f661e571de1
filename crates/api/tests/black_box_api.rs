use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracker_inventory::{InventoryManager, DEFAULT_ITEMS};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(manager: InventoryManager) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = tracker_api::app::build_app(Arc::new(manager));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(InventoryManager::with_items(DEFAULT_ITEMS.iter().copied()).unwrap()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn loan(
    client: &reqwest::Client,
    srv: &TestServer,
    action: &str,
    student: &str,
    item: &str,
) -> reqwest::Response {
    client
        .post(srv.url(&format!("/api/{action}")))
        .query(&[("itemName", item), ("studentName", student)])
        .send()
        .await
        .unwrap()
}

fn availability(summary: &Value, name: &str) -> (i64, i64) {
    let item = summary["itemAvailability"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["name"] == name)
        .unwrap_or_else(|| panic!("{name} missing from summary"));
    (
        item["totalCount"].as_i64().unwrap(),
        item["availableCount"].as_i64().unwrap(),
    )
}

async fn summary(client: &reqwest::Client, srv: &TestServer) -> Value {
    let res = client.get(srv.url("/api/summary")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(InventoryManager::new()).await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_seeded_item_names() {
    let srv = TestServer::spawn_default().await;

    let res = reqwest::get(srv.url("/api/items/names")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let names: Vec<String> = res.json().await.unwrap();
    assert_eq!(names, vec!["Calculator", "Pencil", "iPad"]);
}

#[tokio::test]
async fn create_item_returns_created_item() {
    let srv = TestServer::spawn(InventoryManager::new()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/items"))
        .query(&[("name", "Globe"), ("total", "4")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let item: Value = res.json().await.unwrap();
    assert_eq!(item["name"], "Globe");
    assert_eq!(item["totalCount"], 4);
    assert_eq!(item["availableCount"], 4);

    // Same name again
    let res = client
        .post(srv.url("/api/items"))
        .query(&[("name", "Globe"), ("total", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_item");

    // Negative total
    let res = client
        .post(srv.url("/api/items"))
        .query(&[("name", "Ruler"), ("total", "-2")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_quantity");
}

#[tokio::test]
async fn checkout_checkin_lifecycle() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = loan(&client, &srv, "checkout", "Ada", "Calculator").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "'Calculator' checked out to Ada.");

    let report = summary(&client, &srv).await;
    assert_eq!(availability(&report, "Calculator"), (10, 9));
    let missing = report["missingItems"].as_array().unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0]["studentName"], "Ada");
    assert_eq!(missing[0]["itemName"], "Calculator");
    assert!(missing[0]["checkedOutAt"].is_string());

    // Student name matching ignores case.
    let res = loan(&client, &srv, "checkin", "ADA", "Calculator").await;
    assert_eq!(res.status(), StatusCode::OK);

    let report = summary(&client, &srv).await;
    assert_eq!(availability(&report, "Calculator"), (10, 10));
    assert!(report["missingItems"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn loan_failures_are_bad_requests() {
    let srv = TestServer::spawn(InventoryManager::with_items([("Pencil", 1)]).unwrap()).await;
    let client = reqwest::Client::new();

    let res = loan(&client, &srv, "checkout", "Bob", "Unicycle").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unknown_item");

    let res = loan(&client, &srv, "checkout", "A", "Pencil").await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = loan(&client, &srv, "checkout", "B", "Pencil").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "none_available");

    let res = loan(&client, &srv, "checkin", "B", "Pencil").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "no_matching_record");

    assert_eq!(availability(&summary(&client, &srv).await, "Pencil"), (1, 0));
}

#[tokio::test]
async fn missing_query_parameters_are_rejected() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/checkout"))
        .query(&[("itemName", "Pencil")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_quantity_guards_checked_out_units() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/api/items/iPad/quantity"))
        .query(&[("total", "3")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Total count for 'iPad' updated to 3.");
    assert_eq!(availability(&summary(&client, &srv).await, "iPad"), (3, 3));

    for student in ["A", "B", "C"] {
        let res = loan(&client, &srv, "checkout", student, "iPad").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .put(srv.url("/api/items/iPad/quantity"))
        .query(&[("total", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "below_checked_out");

    let res = client
        .put(srv.url("/api/items/Unicycle/quantity"))
        .query(&[("total", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_conflicts_while_item_is_out() {
    let srv = TestServer::spawn(InventoryManager::with_items([("Lab Coat", 2)]).unwrap()).await;
    let client = reqwest::Client::new();

    let res = loan(&client, &srv, "checkout", "Ada", "Lab Coat").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(srv.url("/api/items/Lab%20Coat"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "item_in_use");

    let res = loan(&client, &srv, "checkin", "Ada", "Lab Coat").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(srv.url("/api/items/Lab%20Coat"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let names: Vec<String> = client
        .get(srv.url("/api/items/names"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn delete_of_unknown_item_conflicts() {
    let srv = TestServer::spawn(InventoryManager::new()).await;
    let client = reqwest::Client::new();

    let res = client
        .delete(srv.url("/api/items/Unicycle"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unknown_item");
}

#[tokio::test]
async fn form_encoded_bodies_are_accepted() {
    let srv = TestServer::spawn(InventoryManager::new()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/items"))
        .form(&[("name", "Globe"), ("total", "3")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let item: Value = res.json().await.unwrap();
    assert_eq!(item["name"], "Globe");
    assert_eq!(item["totalCount"], 3);

    let res = client
        .post(srv.url("/api/checkout"))
        .form(&[("itemName", "Globe"), ("studentName", "Ada")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "'Globe' checked out to Ada.");

    let res = client
        .put(srv.url("/api/items/Globe/quantity"))
        .form(&[("total", "5")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(availability(&summary(&client, &srv).await, "Globe"), (5, 4));

    let res = client
        .post(srv.url("/api/checkin"))
        .form(&[("itemName", "Globe"), ("studentName", "ada")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(availability(&summary(&client, &srv).await, "Globe"), (5, 5));

    // A form body missing a field is rejected, not silently read from the query.
    let res = client
        .post(srv.url("/api/checkout"))
        .form(&[("itemName", "Globe")])
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());
}

#[tokio::test]
async fn concurrent_checkouts_of_last_unit_grant_exactly_one() {
    let srv = TestServer::spawn(InventoryManager::with_items([("Globe", 1)]).unwrap()).await;
    let client = reqwest::Client::new();

    let requests = (0..10).map(|i| {
        let client = client.clone();
        let url = srv.url("/api/checkout");
        tokio::spawn(async move {
            client
                .post(url)
                .query(&[("itemName", "Globe".to_string()), ("studentName", format!("s{i}"))])
                .send()
                .await
                .unwrap()
                .status()
        })
    });

    let mut granted = 0;
    for r in requests.collect::<Vec<_>>() {
        if r.await.unwrap() == StatusCode::OK {
            granted += 1;
        }
    }
    assert_eq!(granted, 1);
    assert_eq!(availability(&summary(&client, &srv).await, "Globe"), (1, 0));
}
