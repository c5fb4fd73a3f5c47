mod common;

use common::{sample_insight_json, spawn_app, stub_gemini};

fn chat_body(session_id: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "message": "How do I beat the competition?",
        "business_type": "Shoe store",
        "state": "Lagos",
        "area": "Ikeja",
        "insight": sample_insight_json()
    });
    if let Some(sid) = session_id {
        body["session_id"] = serde_json::json!(sid);
    }
    body
}

#[tokio::test]
async fn chat_mints_a_session_and_persists_both_turns() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, "Focus on service speed and loyal customers.".to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&chat_body(None))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let session_id = body["item"]["session_id"].as_str().unwrap().to_string();
    assert_eq!(session_id.len(), 16);
    assert_eq!(
        body["item"]["response"],
        "Focus on service speed and loyal customers."
    );

    let turns: i64 = sqlx::query_scalar("SELECT count(*) FROM chat_history WHERE session_id = $1")
        .bind(&session_id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count turns");
    assert_eq!(turns, 2);
}

#[tokio::test]
async fn chat_continues_an_existing_session() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, "Try weekend promotions.".to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&chat_body(None))
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let session_id = body["item"]["session_id"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&chat_body(Some(&session_id)))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/chat/{}", app.address, session_id))
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let list = body["list"].as_array().unwrap();
    assert_eq!(list.len(), 4);
    // Oldest first, alternating roles.
    assert_eq!(list[0]["role"], "user");
    assert_eq!(list[1]["role"], "assistant");
    assert_eq!(list[3]["role"], "assistant");
}

#[tokio::test]
async fn deleting_a_session_drops_its_history() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, "Answer.".to_string()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&chat_body(None))
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    let session_id = body["item"]["session_id"].as_str().unwrap().to_string();

    let response = client
        .delete(format!("{}/chat/{}", app.address, session_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/chat/{}", app.address, session_id))
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.expect("Invalid body");
    assert!(body["list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chat_with_unknown_business_code_is_rejected_before_the_model_call() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let mut body = chat_body(None);
    body["business_code"] = serde_json::json!("DEADBEEF");

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
    // No stub was mounted; the mock server also saw no requests.
    assert!(app.gemini.received_requests().await.unwrap().is_empty());

    let turns: i64 = sqlx::query_scalar("SELECT count(*) FROM chat_history")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count turns");
    assert_eq!(turns, 0);
}

#[tokio::test]
async fn chat_prompt_carries_the_last_six_turns_oldest_first() {
    let Some(app) = spawn_app().await else { return };
    stub_gemini(&app, "Noted.".to_string()).await;
    let client = reqwest::Client::new();

    let session_id = "feedfacefeedface";
    for i in 1..=8 {
        let role = if i % 2 == 1 { "user" } else { "assistant" };
        sqlx::query(
            r#"
            INSERT INTO chat_history (session_id, role, message, created_at)
            VALUES ($1, $2, $3, NOW() at time zone 'utc')
            "#,
        )
        .bind(session_id)
        .bind(role)
        .bind(format!("turn {}", i))
        .execute(&app.db_pool)
        .await
        .expect("Failed to seed chat turn");
    }

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&chat_body(Some(session_id)))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let requests = app.gemini.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("Request body is not JSON");
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

    // The two oldest turns fall outside the prompt window.
    assert!(!prompt.contains("turn 1"));
    assert!(!prompt.contains("turn 2"));
    assert!(prompt.contains("turn 3"));
    assert!(prompt.contains("turn 8"));
    assert!(prompt.find("turn 3").unwrap() < prompt.find("turn 8").unwrap());
}

#[tokio::test]
async fn chat_rejects_empty_message() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();

    let mut body = chat_body(None);
    body["message"] = serde_json::json!("");

    let response = client
        .post(format!("{}/chat", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}
