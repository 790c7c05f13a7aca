use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use api_types::task::PendingTask;
use client::{ApiClient, ApiError, TaskStatus};
use filters::AssetResolver;

async fn client_for(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(&format!("http://{addr}/api/1")).unwrap()
}

async fn async_task(
    task_id: u64,
    params: HashMap<String, String>,
) -> (StatusCode, Json<Value>) {
    if params.get("async_query").map(String::as_str) != Some("true") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"result": null, "message": "expected async query"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"result": {"task_id": task_id}, "message": ""})),
    )
}

fn defi_router() -> Router {
    Router::new()
        .route(
            "/api/1/blockchains/ETH/defi",
            get(|Query(params): Query<HashMap<String, String>>| async_task(7, params)),
        )
        .route(
            "/api/1/blockchains/ETH/airdrops",
            get(|Query(params): Query<HashMap<String, String>>| async_task(8, params)),
        )
}

#[tokio::test]
async fn fetch_all_defi_returns_pending_task() {
    let client = client_for(defi_router()).await;
    let task = client.fetch_all_defi().await.unwrap();
    assert_eq!(task, PendingTask { task_id: 7 });
}

#[tokio::test]
async fn fetch_airdrops_returns_pending_task() {
    let client = client_for(defi_router()).await;
    let task = client.fetch_airdrops().await.unwrap();
    assert_eq!(task, PendingTask { task_id: 8 });
}

#[tokio::test]
async fn null_result_is_a_backend_error() {
    let router = Router::new().route(
        "/api/1/blockchains/ETH/airdrops",
        get(|| async {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"result": null, "message": "etherscan unreachable"})),
            )
        }),
    );
    let client = client_for(router).await;
    match client.fetch_airdrops().await {
        Err(ApiError::Backend { status, message }) => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(message, "etherscan unreachable");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn conflict_with_result_is_accepted() {
    let router = Router::new().route(
        "/api/1/blockchains/ETH/airdrops",
        get(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({"result": {"task_id": 3}, "message": "already running"})),
            )
        }),
    );
    let client = client_for(router).await;
    assert_eq!(client.fetch_airdrops().await.unwrap().task_id, 3);
}

#[tokio::test]
async fn unauthorized_is_a_session_error() {
    let router = Router::new().route(
        "/api/1/blockchains/ETH/defi",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let client = client_for(router).await;
    assert!(matches!(
        client.fetch_all_defi().await,
        Err(ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn other_status_is_unexpected() {
    let router = Router::new().route(
        "/api/1/blockchains/ETH/defi",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = client_for(router).await;
    assert!(matches!(
        client.fetch_all_defi().await,
        Err(ApiError::UnexpectedStatus(status)) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
}

#[tokio::test]
async fn transport_failure_propagates() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ApiClient::new(&format!("http://{addr}/api/1")).unwrap();
    assert!(matches!(
        client.fetch_all_defi().await,
        Err(ApiError::Transport(_))
    ));
}

#[tokio::test]
async fn task_status_variants() {
    let router = Router::new().route(
        "/api/1/tasks/{id}",
        get(|Path(id): Path<u64>| async move {
            let result = match id {
                1 => json!({"status": "pending", "outcome": null}),
                2 => json!({"status": "completed", "outcome": {"result": {"eth": 1}}}),
                _ => json!({"status": "not-found", "outcome": null}),
            };
            Json(json!({"result": result, "message": ""}))
        }),
    );
    let client = client_for(router).await;
    assert_eq!(client.task_status(1).await.unwrap(), TaskStatus::Pending);
    assert_eq!(
        client.task_status(2).await.unwrap(),
        TaskStatus::Completed(json!({"result": {"eth": 1}}))
    );
    assert_eq!(client.task_status(9).await.unwrap(), TaskStatus::NotFound);
}

#[tokio::test]
async fn unknown_task_answered_with_404_is_not_found() {
    let router = Router::new().route(
        "/api/1/tasks/{id}",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "result": {"status": "not-found", "outcome": null},
                    "message": "No task with id 5 found"
                })),
            )
        }),
    );
    let client = client_for(router).await;
    assert_eq!(client.task_status(5).await.unwrap(), TaskStatus::NotFound);
}

#[tokio::test]
async fn null_message_is_still_a_backend_error() {
    let router = Router::new().route(
        "/api/1/blockchains/ETH/defi",
        get(|| async {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"result": null, "message": null})),
            )
        }),
    );
    let client = client_for(router).await;
    match client.fetch_all_defi().await {
        Err(ApiError::Backend { status, message }) => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert!(message.is_empty());
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn not_found_is_unexpected_outside_tasks() {
    let router = Router::new().route(
        "/api/1/blockchains/ETH/defi",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({"result": null, "message": ""}))) }),
    );
    let client = client_for(router).await;
    assert!(matches!(
        client.fetch_all_defi().await,
        Err(ApiError::UnexpectedStatus(status)) if status == StatusCode::NOT_FOUND
    ));
}

fn assets_router() -> Router {
    Router::new()
        .route(
            "/api/1/assets/search_levenshtein",
            post(|Json(body): Json<Value>| async move {
                let query = body["value"].as_str().unwrap_or_default().to_lowercase();
                let all = [("ETH", "Ethereum"), ("BTC", "Bitcoin")];
                let found: Vec<Value> = all
                    .iter()
                    .filter(|(_, name)| name.to_lowercase().contains(&query))
                    .map(|(id, name)| json!({"identifier": id, "name": name, "symbol": id}))
                    .collect();
                Json(json!({"result": found, "message": ""}))
            }),
        )
        .route(
            "/api/1/assets/mappings",
            post(|Json(body): Json<Value>| async move {
                let mut assets = serde_json::Map::new();
                for id in body["identifiers"].as_array().into_iter().flatten() {
                    if *id == "ETH" {
                        assets.insert(
                            "ETH".to_string(),
                            json!({"name": "Ethereum", "symbol": "ETH"}),
                        );
                    }
                }
                Json(json!({"result": {"assets": assets}, "message": ""}))
            }),
        )
        .route(
            "/api/1/locations/associated",
            get(|| async { Json(json!({"result": ["kraken", "binance"], "message": ""})) }),
        )
}

#[tokio::test]
async fn asset_resolver_over_http() {
    let client = client_for(assets_router()).await;

    let found = AssetResolver::search(&client, "ether", 5).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identifier, "ETH");

    let info = AssetResolver::info(&client, "ETH").await.unwrap().unwrap();
    assert_eq!(info.identifier, "ETH");
    assert_eq!(info.name.as_deref(), Some("Ethereum"));

    assert!(AssetResolver::info(&client, "DOGE").await.unwrap().is_none());
}

#[tokio::test]
async fn associated_locations_are_listed() {
    let client = client_for(assets_router()).await;
    assert_eq!(
        client.associated_locations().await.unwrap(),
        vec!["kraken".to_string(), "binance".to_string()]
    );
}
