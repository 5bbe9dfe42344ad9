use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use forage::{ForageError, RecipeSearch, SpoonacularClient, SpoonacularConfig};

fn client_for(server: &MockServer) -> SpoonacularClient {
    SpoonacularClient::new(SpoonacularConfig::new("test-key").base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn sends_ingredients_count_and_key_as_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/findByIngredients"))
        .and(query_param("ingredients", "beef,cheese"))
        .and(query_param("number", "5"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"title": "Beef Stew"},
            {"title": "Cheese Omelette"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server).search("beef,cheese", 5).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], json!("Beef Stew"));
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client_for(&server).search("beef", 1).await;
    assert!(matches!(result, Err(ForageError::AuthenticationFailed)));
}

#[tokio::test]
async fn quota_exhausted_maps_to_authentication_failed() {
    // Spoonacular signals a spent daily quota with 402
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&server)
        .await;

    let result = client_for(&server).search("beef", 1).await;
    assert!(matches!(result, Err(ForageError::AuthenticationFailed)));
}

#[tokio::test]
async fn rate_limit_carries_retry_after_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let result = client_for(&server).search("beef", 1).await;
    match result {
        Err(ForageError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_transient_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let result = client_for(&server).search("beef", 1).await;
    match result {
        Err(err @ ForageError::Api { status, .. }) if status == 503 => {
            assert!(err.is_transient());
        }
        other => panic!("expected Api 503, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_permanent_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).search("beef", 1).await;
    match result {
        Err(err @ ForageError::Json(_)) => assert!(!err.is_transient()),
        other => panic!("expected Json error, got {other:?}"),
    }
}
