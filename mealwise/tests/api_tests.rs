mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mealwise::api::{create_router, AppState};
use mealwise::config::Config;

async fn app_for(server: &MockServer) -> Router {
    let mut config = Config::ephemeral();
    config.llm = common::llm_config_with_base_url(server.uri());
    let db = common::memory_backend().await;
    let llm = common::provider_for(server.uri());
    create_router(AppState::new(config, db, llm))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_generate_then_plan_week() {
    common::init_test_logger();
    let server = MockServer::start().await;
    let reply = format!("Here is your plan:\n{}", Value::Array(common::recipe_batch(12)));
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::completion_body(&reply)))
        .mount(&server)
        .await;
    let app = app_for(&server).await;

    let body = json!({
        "apiKey": "sk-or-test",
        "preferences": common::vegan_preferences(),
        "numberOfDays": 4
    });
    let (status, json) = call(&app, "POST", "/api/v1/meal-plans", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["recipes"].as_array().unwrap().len(), 12);

    let (_, current) = call(&app, "GET", "/api/v1/meal-plans/current", None).await;
    assert_eq!(current["recipes"], json["recipes"]);

    let (status, plan) = call(&app, "POST", "/api/v1/calendar:auto-assign", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    for day in 0..4 {
        for slot in ["breakfast", "lunch", "dinner"] {
            assert!(plan["days"][day][slot]["recipeId"].is_string(), "day {day} {slot}");
        }
    }

    let (status, list) = call(&app, "GET", "/api/v1/shopping-list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["itemCount"], 2);
    let chickpeas = &list["groups"][0]["items"][0];
    assert_eq!(chickpeas["name"], "Chickpeas");
    assert_eq!(
        chickpeas["amount"].as_str().unwrap().matches(" + ").count(),
        11
    );
}

#[tokio::test]
async fn test_recovery_failure_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::completion_body(r#"[{"name":"Soup [hot] and co"#)),
        )
        .mount(&server)
        .await;
    let app = app_for(&server).await;

    let body = json!({"apiKey": "sk-or-test", "preferences": common::vegan_preferences()});
    let (status, json) = call(&app, "POST", "/api/v1/meal-plans", Some(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], 500);
    assert_eq!(
        json["error"],
        "Response was truncated. Try requesting fewer meals or try again."
    );
}

#[tokio::test]
async fn test_invalid_key_is_server_error_with_friendly_copy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;
    let app = app_for(&server).await;

    let body = json!({"apiKey": "sk-or-bad", "preferences": common::vegan_preferences()});
    let (status, json) = call(&app, "POST", "/api/v1/meal-plans", Some(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["error"],
        "Invalid API key. Please check your OpenRouter API key in settings."
    );
}

#[tokio::test]
async fn test_validate_stored_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;
    let app = app_for(&server).await;

    let (status, _) = call(&app, "POST", "/api/v1/settings:validate-key", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    call(
        &app,
        "PUT",
        "/api/v1/settings",
        Some(json!({"openRouterApiKey": "sk-or-stored"})),
    )
    .await;
    let (status, json) = call(&app, "POST", "/api/v1/settings:validate-key", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);
}

#[tokio::test]
async fn test_out_of_range_days_rejected() {
    let server = MockServer::start().await;
    let app = app_for(&server).await;

    let body = json!({
        "apiKey": "sk-or-test",
        "preferences": common::vegan_preferences(),
        "numberOfDays": 15
    });
    let (status, json) = call(&app, "POST", "/api/v1/meal-plans", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("numberOfDays"));
}
