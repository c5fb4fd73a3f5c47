use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;

/// DELETE /business/{code}
/// Remove a business and, through cascade, its insights and chat history.
#[tracing::instrument(name = "Delete business.", skip(pool))]
#[delete("/{code}")]
pub async fn item(path: web::Path<String>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let code = path.into_inner();

    let deleted = db::business::delete(pool.get_ref(), &code)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    if deleted == 0 {
        return Err(JsonResponse::not_found("Business not found"));
    }

    tracing::info!(code = %code, "Deleted business");
    Ok(JsonResponse::<String>::build().ok("Deleted"))
}
