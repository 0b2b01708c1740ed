use reqwest::{Method, StatusCode};

use crate::helpers::{spawn_app, spawn_app_with_origin};

const ORIGIN: &str = "http://localhost:5173";

#[tokio::test]
async fn preflight_from_allowed_origin_is_accepted() {
    let app = spawn_app_with_origin(ORIGIN).await;

    let response = app
        .client
        .request(Method::OPTIONS, app.api_url("/books"))
        .header("origin", ORIGIN)
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ORIGIN);
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"), "got {methods}");
    let allowed = headers["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("authorization"), "got {allowed}");
}

#[tokio::test]
async fn other_origins_get_no_cors_headers() {
    let app = spawn_app_with_origin(ORIGIN).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("access-control-allow-origin").is_none());

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("origin", ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);
}

#[tokio::test]
async fn without_an_origin_no_cross_origin_access_is_granted() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("origin", ORIGIN)
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
