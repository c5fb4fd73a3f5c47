use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;

/// DELETE /chat/{session_id}
#[tracing::instrument(name = "Delete chat history.", skip(pool))]
#[delete("/{session_id}")]
pub async fn item(path: web::Path<String>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let session_id = path.into_inner();

    let deleted = db::chat::delete_session(pool.get_ref(), &session_id)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    tracing::info!(session_id = %session_id, deleted, "Dropped chat session");
    Ok(JsonResponse::<String>::build().ok("Deleted"))
}
