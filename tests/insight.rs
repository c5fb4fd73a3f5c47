mod common;

use common::{sample_insight_json, save_business, spawn_app, stub_gemini};

#[tokio::test]
async fn generate_insight_persists_and_returns_payload() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, sample_insight_json().to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/insights/generate", app.address))
        .json(&serde_json::json!({
            "business_type": "Shoe store",
            "state": "Lagos",
            "area": "Ikeja"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let item = &body["item"];
    assert_eq!(item["state"], "Lagos");
    assert_eq!(item["quick_wins"].as_array().unwrap().len(), 3);
    assert!(item["competition"].as_str().unwrap().starts_with("HIGH"));
    assert_eq!(item["grounded"], true);

    let stored: i64 = sqlx::query_scalar("SELECT count(*) FROM insights")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count insights");
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn generate_accepts_fenced_model_answer() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, format!("```json\n{}\n```", sample_insight_json())).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/insights/generate", app.address))
        .json(&serde_json::json!({
            "business_type": "Pharmacy",
            "state": "Kano"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn generate_with_unknown_business_is_rejected_before_the_model_call() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/insights/generate", app.address))
        .json(&serde_json::json!({
            "business_type": "Shoe store",
            "state": "Lagos",
            "business_code": "DEADBEEF"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
    // No stub was mounted, so any model call would have failed loudly; the
    // mock server also saw no requests.
    assert!(app.gemini.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_json_model_answer_is_a_bad_gateway() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, "Sorry, I cannot help with that.".to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/insights/generate", app.address))
        .json(&serde_json::json!({
            "business_type": "Shoe store",
            "state": "Lagos"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 502);

    let stored: i64 = sqlx::query_scalar("SELECT count(*) FROM insights")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count insights");
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn insight_history_is_newest_first() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, sample_insight_json().to_string()).await;
    let client = reqwest::Client::new();

    let code = save_business(&app, &client).await;

    for _ in 0..2 {
        let response = client
            .post(format!("{}/insights/generate", app.address))
            .json(&serde_json::json!({
                "business_type": "Shoe store",
                "state": "Lagos",
                "area": "Ikeja",
                "business_code": code
            }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success());
    }

    let response = client
        .get(format!("{}/business/{}/insights", app.address, code))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let list = body["list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    let first = list[0]["id"].as_i64().unwrap();
    let second = list[1]["id"].as_i64().unwrap();
    assert!(first > second);
}

#[tokio::test]
async fn report_download_is_plain_text() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, sample_insight_json().to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/insights/generate", app.address))
        .json(&serde_json::json!({
            "business_type": "Shoe store",
            "state": "Lagos",
            "area": "Ikeja"
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let id = body["item"]["id"].as_i64().unwrap();

    let response = client
        .get(format!("{}/insights/{}/report", app.address, id))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = response.text().await.expect("Invalid body");
    assert!(text.contains("KIOMATE BUSINESS INSIGHTS"));
    assert!(text.contains("1. Open an hour earlier to catch commuters"));
}

#[tokio::test]
async fn analytics_summary_counts_generated_insights() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, sample_insight_json().to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/insights/generate", app.address))
        .json(&serde_json::json!({
            "business_type": "Shoe store",
            "state": "Lagos"
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/analytics/summary", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(body["total_insights_generated"], 1);
    assert_eq!(body["popular_states"][0]["state"], "Lagos");
}
