use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

/// GET /insights/{id}
#[tracing::instrument(name = "Get insight.", skip(pool))]
#[get("/{id}")]
pub async fn item(path: web::Path<i32>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let id = path.into_inner();

    db::insight::fetch(pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
        .map(|insight| JsonResponse::build().set_item(insight).ok("OK"))
        .ok_or_else(|| JsonResponse::not_found("Insight not found"))
}
