use crate::connectors::InsightModel;
use crate::db;
use crate::forms;
use crate::helpers::{business_code, JsonResponse};
use crate::models::ChatTurn;
use crate::services::insight::build_chat_prompt;
use actix_web::{post, web, Responder, Result};
use serde::Serialize;
use serde_json::json;
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// How much history goes back into the prompt.
const PROMPT_HISTORY_TURNS: i64 = 6;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub session_id: String,
}

/// POST /chat
/// Ask a question about a generated insight. Mints a session id when the
/// client has none, and persists both turns.
#[tracing::instrument(name = "Chat about insight.", skip(pool, model))]
#[post("")]
pub async fn item(
    web::Json(form): web::Json<forms::ChatRequest>,
    pool: web::Data<PgPool>,
    model: web::Data<Arc<dyn InsightModel>>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    // chat_history.business_code is a foreign key; resolve the code up front
    // so an unknown one is a 404 instead of a constraint error after the
    // model call has already been paid for.
    if let Some(code) = form.business_code.as_deref() {
        db::business::fetch(pool.get_ref(), code)
            .await
            .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
            .ok_or_else(|| JsonResponse::not_found(format!("Business {} not found", code)))?;
    }

    let session_id = form
        .session_id
        .clone()
        .filter(|sid| !sid.is_empty())
        .unwrap_or_else(business_code::make_session_id);

    let history = db::chat::recent_turns(pool.get_ref(), &session_id, PROMPT_HISTORY_TURNS)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    let prompt = build_chat_prompt(
        &form.message,
        &form.business_type,
        &form.state,
        form.area.as_deref(),
        &form.insight,
        &history,
    );

    let answer = model
        .generate(&prompt, true)
        .await
        .map_err(actix_web::Error::from)?;

    db::chat::insert_turn(
        pool.get_ref(),
        &session_id,
        form.business_code.as_deref(),
        ChatTurn::ROLE_USER,
        &form.message,
    )
    .await
    .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    db::chat::insert_turn(
        pool.get_ref(),
        &session_id,
        form.business_code.as_deref(),
        ChatTurn::ROLE_ASSISTANT,
        &answer,
    )
    .await
    .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    db::analytics::record(
        pool.get_ref(),
        "chat_message",
        form.business_code.as_deref(),
        Some(json!({ "session_id": session_id })),
    )
    .await;

    Ok(JsonResponse::build()
        .set_id(session_id.clone())
        .set_item(ChatReply {
            response: answer,
            session_id,
        })
        .ok("OK"))
}
