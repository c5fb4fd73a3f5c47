use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

/// GET /chat/{session_id}
/// All turns of a session, oldest first.
#[tracing::instrument(name = "Get chat history.", skip(pool))]
#[get("/{session_id}")]
pub async fn item(path: web::Path<String>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let session_id = path.into_inner();

    let turns = db::chat::fetch_session(pool.get_ref(), &session_id)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    Ok(JsonResponse::build().set_list(turns).ok("OK"))
}
