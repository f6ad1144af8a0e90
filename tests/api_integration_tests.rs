//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint, with Steam
//! replaced by a mock server.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use steam_gateway::{api::create_router, AppState, Config, SteamClient};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// == Helper Functions ==

const GABEN: &str = "76561197960287930";

fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: server.uri(),
        store_base_url: format!("{}/api", server.uri()),
        owner_steam_id: Some(GABEN.to_string()),
        requests_per_second: 1000.0,
        max_retries: 2,
        retry_backoff: Duration::from_millis(10),
        request_timeout: Duration::from_secs(2),
        ..Config::default().with_api_key("test_key")
    }
}

fn create_test_app(server: &MockServer) -> Router {
    let client = SteamClient::with_dedicated_limiter(&test_config(server)).unwrap();
    create_router(AppState::with_builtin_tools(client))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn call_tool(app: Router, name: &str, arguments: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/tools/{}", name))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "arguments": arguments }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn mount_player(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/ISteamUser/GetPlayerSummaries/v2/"))
        .and(query_param("steamids", GABEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"players": [{
                "steamid": GABEN,
                "personaname": "Rabscuttle",
                "profileurl": "https://steamcommunity.com/id/gabelogannewell/",
                "communityvisibilitystate": 3,
                "personastate": 0
            }]}
        })))
        .mount(server)
        .await;
}

// == Health and Tool Listing ==

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_list_tools_endpoint() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let response = app
        .oneshot(Request::builder().uri("/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let tools = json["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);

    let summary = tools
        .iter()
        .find(|t| t["name"] == "get_player_summary")
        .unwrap();
    assert_eq!(summary["params"][0]["name"], "steam_id");
    assert_eq!(summary["params"][0]["required"], true);
}

// == Tool Calls ==

#[tokio::test]
async fn test_player_summary_tool() {
    let server = MockServer::start().await;
    mount_player(&server).await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_player_summary", json!({"steam_id": "[U:1:22202]"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tool"], "get_player_summary");
    assert_eq!(json["is_error"], false);
    let content = json["content"].as_str().unwrap();
    assert!(content.contains("Player: Rabscuttle"));
    assert!(content.contains("Visibility: Public"));
}

#[tokio::test]
async fn test_player_summary_resolves_vanity_name() {
    let server = MockServer::start().await;
    mount_player(&server).await;
    Mock::given(method("GET"))
        .and(path("/ISteamUser/ResolveVanityURL/v1/"))
        .and(query_param("vanityurl", "gabelogannewell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"steamid": GABEN, "success": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(
        app,
        "get_player_summary",
        json!({"steam_id": "https://steamcommunity.com/id/gabelogannewell/"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["content"].as_str().unwrap().contains(GABEN));
}

#[tokio::test]
async fn test_my_profile_tool_uses_owner_id() {
    let server = MockServer::start().await;
    mount_player(&server).await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_my_profile", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["content"]
        .as_str()
        .unwrap()
        .starts_with("Owner profile\nPlayer: Rabscuttle"));
}

#[tokio::test]
async fn test_owned_games_private_profile_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/IPlayerService/GetOwnedGames/v1/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_owned_games", json!({"steam_id": GABEN})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_error"], false);
    assert_eq!(json["content"], steam_gateway::tools::PRIVATE_PROFILE_NOTICE);
}

#[tokio::test]
async fn test_current_players_tool() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ISteamUserStats/GetNumberOfCurrentPlayers/v1/"))
        .and(query_param("appid", "440"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"player_count": 51234, "result": 1}
        })))
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_current_players", json!({"app_id": 440})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], "App ID 440: 51234 players currently in game");
}

#[tokio::test]
async fn test_app_details_tool_uses_store_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/appdetails"))
        .and(query_param("appids", "620"))
        .and(query_param("cc", "gb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "620": {"success": true, "data": {"name": "Portal 2", "type": "game", "is_free": false}}
        })))
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(
        app,
        "get_app_details",
        json!({"app_id": "620", "country_code": "GB"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let content = json["content"].as_str().unwrap();
    assert!(content.starts_with("Portal 2"));
    assert!(content.contains("Price: Price not available"));
}

#[tokio::test]
async fn test_news_count_is_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ISteamNews/GetNewsForApp/v2/"))
        .and(query_param("count", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appnews": {"appid": 440, "newsitems": []}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_news_for_app", json!({"app_id": 440, "count": 500})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], "No news found for App ID 440.");
}

#[tokio::test]
async fn test_upstream_failure_is_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ISteamUserStats/GetNumberOfCurrentPlayers/v1/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_current_players", json!({"app_id": 440})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_error"], true);
    assert!(json["content"]
        .as_str()
        .unwrap()
        .starts_with("Error: Request failed after 2 attempts"));
}

// == Error Responses ==

#[tokio::test]
async fn test_unknown_tool_returns_404() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "not_a_tool", json!({})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not_a_tool"));
}

#[tokio::test]
async fn test_missing_argument_returns_400() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, json) = call_tool(app, "get_owned_games", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("steam_id"));
}

#[tokio::test]
async fn test_invalid_steam_id_returns_400() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let (status, _) = call_tool(app, "get_player_summary", json!({"steam_id": "???"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

// == Cache Administration ==

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let server = MockServer::start().await;
    mount_player(&server).await;
    let app = create_test_app(&server);

    for _ in 0..2 {
        let (status, _) = call_tool(app.clone(), "get_player_summary", json!({"steam_id": GABEN})).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/cache/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["enabled"], true);
    assert_eq!(json["size"], 1);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 50.0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cleared"], 1);
}

#[tokio::test]
async fn test_cache_stats_when_disabled() {
    let server = MockServer::start().await;
    let config = Config {
        cache_enabled: false,
        ..test_config(&server)
    };
    let client = SteamClient::with_dedicated_limiter(&config).unwrap();
    let app = create_router(AppState::with_builtin_tools(client));

    let response = app
        .oneshot(Request::builder().uri("/cache/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["enabled"], false);
    assert_eq!(json["size"], 0);
}
