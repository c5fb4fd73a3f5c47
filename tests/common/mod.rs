use kiomate::configuration::{get_configuration, DatabaseSettings};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub gemini: MockServer,
}

pub async fn spawn_app() -> Option<TestApp> {
    // The real key never leaves the environment; tests talk to wiremock.
    std::env::set_var("GEMINI_API_KEY", "test-key");

    let mut configuration = get_configuration().expect("Failed to get configuration");

    let gemini = MockServer::start().await;
    configuration.gemini.base_url = gemini.uri();
    configuration.gemini.retry_attempts = 1;
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = kiomate::startup::run(listener, connection_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        gemini,
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

/// A well-formed insight payload, as the model should answer it.
pub fn sample_insight_json() -> serde_json::Value {
    serde_json::json!({
        "peak_hours": "Busiest between 4pm and 8pm on weekdays.",
        "competition": "HIGH competition due to the density of shops around Ikeja.",
        "price_sensitivity": "Customers expect to negotiate on every purchase.",
        "quick_wins": [
            "Open an hour earlier to catch commuters",
            "Accept bank transfers at the counter",
            "Bundle accessories with every sale"
        ],
        "customer_profile": "Office workers and traders with steady mid-range income.",
        "competitive_landscape": "A dense cluster of similar shops within walking distance.",
        "growth_opportunity": "Same-day delivery to nearby estates is underserved.",
        "data_note": "Based on recent market data for Ikeja, Lagos"
    })
}

/// Stub the Gemini generateContent endpoint with the given answer text.
pub async fn stub_gemini(app: &TestApp, answer_text: String) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": answer_text }] }
            }]
        })))
        .mount(&app.gemini)
        .await;
}

/// Insert an active partner key with the given quota, bypassing approval.
pub async fn seed_partner(app: &TestApp, api_key: &str, quota: i64) {
    sqlx::query(
        r#"
        INSERT INTO api_clients
            (api_key, company, email, use_case, status, requests_remaining, created_at, updated_at)
        VALUES ($1, 'Test Fintech', 'dev@testfintech.ng', 'integration tests', 'active', $2,
                NOW() at time zone 'utc', NOW() at time zone 'utc')
        "#,
    )
    .bind(api_key)
    .bind(quota)
    .execute(&app.db_pool)
    .await
    .expect("Failed to seed partner key");
}

/// Register a business through the API and return its code.
pub async fn save_business(app: &TestApp, client: &reqwest::Client) -> String {
    let response = client
        .post(format!("{}/business", app.address))
        .json(&serde_json::json!({
            "business_name": "Tunde's Fashion Store",
            "business_type": "Shoe store",
            "state": "Lagos",
            "area": "Ikeja"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    body["id"].as_str().expect("Missing business id").to_string()
}
