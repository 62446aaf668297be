//! End-to-end API flow tests against a real PostgreSQL database.
//!
//! These run only when `TEST_DATABASE_URL` points at a disposable test
//! database; without it the test is skipped so the pure unit tests can
//! run anywhere. The whole flow lives in one test because the steps
//! build on each other (and on a truncated schema).

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use business_directory::{AppState, build_router, config::Config, db};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

// Both tests truncate the shared test database; serialize them.
static DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

async fn build_app(database_url: &str) -> anyhow::Result<Router> {
    let pool = db::create_pool(database_url).await?;
    db::run_migrations(&pool).await?;

    // Each run starts from an empty directory
    sqlx::query("TRUNCATE TABLE reviews, businesses, token_blacklist, users")
        .execute(&pool)
        .await?;

    let config = Config {
        database_url: database_url.to_string(),
        jwt_secret: "flow-test-secret".to_string(),
        server_port: 0,
        token_expiry_hours: 1,
    };
    Ok(build_router(AppState { pool, config }))
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}

async fn register_and_login(
    app: &Router,
    email: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<String> {
    let body = json!({ "email": email, "username": username, "password": password });
    let (status, _) = send(app, "POST", "/api/v1/register", None, Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let body = json!({ "email": email, "password": password });
    let (status, json) = send(app, "POST", "/api/v1/login", None, Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(json["access_token"].as_str().expect("no token").to_string())
}

#[tokio::test]
async fn test_full_api_flow() -> anyhow::Result<()> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping API flow test");
        return Ok(());
    };
    let _guard = DB_LOCK.lock().await;
    let app = build_app(&database_url).await?;

    // --- Empty directory has a distinct message, not an empty list ---
    let (status, body) = send(&app, "GET", "/api/v1/business", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No businesses found");

    // --- Registration validation ---
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/register",
        None,
        Some(json!({ "email": "not-an-email", "username": "a", "password": "b" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/register",
        None,
        Some(json!({ "email": "jane@example.com", "username": "jane" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0], "Please enter your password");

    // --- Registration, duplicate email, login ---
    let owner_token = register_and_login(&app, "jane@example.com", "jane", "hunter2hunter2").await?;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/register",
        None,
        Some(json!({ "email": "jane@example.com", "username": "jane2", "password": "x" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "User already exists");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/login",
        None,
        Some(json!({ "email": "jane@example.com", "password": "wrong" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // --- Business creation requires auth ---
    let listing = json!({
        "name": "KTDA",
        "description": "Tea growers cooperative",
        "category": "Farming",
        "location": "Narok",
    });
    let (status, _) = send(&app, "POST", "/api/v1/business", None, Some(listing.clone())).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/business",
        Some(&owner_token),
        Some(listing.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Business created successfully");
    let business_id = body["business"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/business",
        Some(&owner_token),
        Some(json!({ "name": "KTDA", "category": "Farming", "location": "Narok" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0], "Please enter your description");

    // --- Reads are public ---
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/business/{business_id}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "KTDA");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/business/{}", Uuid::new_v4()),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/v1/business", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businesses"].as_array().unwrap().len(), 1);
    assert_eq!(body["next_page"], false);

    // --- Only the owner may update ---
    let intruder_token = register_and_login(&app, "eve@example.com", "eve", "password123").await?;
    let update = json!({
        "name": "KTDA Holdings",
        "description": "Updated description",
        "category": "Farming",
        "location": "Nairobi",
    });
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/business/{business_id}"),
        Some(&intruder_token),
        Some(update.clone()),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "The operation is Forbidden");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/business/{business_id}"),
        Some(&owner_token),
        Some(update),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["business"]["name"], "KTDA Holdings");

    // --- Search: substring match, refinement, miss message ---
    let (status, body) = send(&app, "GET", "/api/v1/search?q=ktda", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businesses"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/search?q=ktda&cat=farming&loc=nairobi",
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businesses"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/v1/search?q=ktda&cat=mining", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Your search for ktda did not match any business"
    );

    let (status, _) = send(&app, "GET", "/api/v1/search?q=", None, None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // --- Reviews ---
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/business/{business_id}/reviews"),
        Some(&intruder_token),
        Some(json!({ "review_text": "Great tea." })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["review"]["username"], "eve");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/business/{}/reviews", Uuid::new_v4()),
        Some(&intruder_token),
        Some(json!({ "review_text": "Great tea." })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/business/{business_id}/reviews"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);

    // --- Delete: password re-confirmation, then ownership ---
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/business/{business_id}"),
        Some(&owner_token),
        Some(json!({ "password": "wrong-password" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/business/{business_id}"),
        Some(&intruder_token),
        Some(json!({ "password": "password123" })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/v1/business/{business_id}"),
        Some(&owner_token),
        Some(json!({ "password": "hunter2hunter2" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Business deleted successfully");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/business/{business_id}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // --- Logout revokes the token ---
    let (status, _) = send(&app, "POST", "/api/v1/logout", Some(&owner_token), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/business",
        Some(&owner_token),
        Some(listing),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_pagination_next_page_indicator() -> anyhow::Result<()> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping pagination test");
        return Ok(());
    };
    let _guard = DB_LOCK.lock().await;
    let app = build_app(&database_url).await?;
    let token = register_and_login(&app, "list@example.com", "lister", "password123").await?;

    for i in 0..3 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/business",
            Some(&token),
            Some(json!({
                "name": format!("Shop {i}"),
                "description": "A shop",
                "category": "Retail",
                "location": "Narok",
            })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/v1/business?page=1&limit=2", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businesses"].as_array().unwrap().len(), 2);
    assert_eq!(body["next_page"], true);

    let (status, body) = send(&app, "GET", "/api/v1/business?page=2&limit=2", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businesses"].as_array().unwrap().len(), 1);
    assert_eq!(body["next_page"], false);

    // Search pagination uses the same over-fetch scheme
    let (status, body) = send(&app, "GET", "/api/v1/search?q=shop", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businesses"].as_array().unwrap().len(), 2);
    assert_eq!(body["next_page"], true);

    Ok(())
}
