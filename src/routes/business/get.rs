use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

/// GET /business/{code}
/// Fetch a business by its Business ID. The code is the login credential,
/// so a successful fetch also bumps `last_active`.
#[tracing::instrument(name = "Get business.", skip(pool))]
#[get("/{code}")]
pub async fn item(path: web::Path<String>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let code = path.into_inner();

    db::business::fetch_and_touch(pool.get_ref(), &code)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
        .map(|business| JsonResponse::build().set_item(business).ok("OK"))
        .ok_or_else(|| JsonResponse::not_found("Business not found. Check the ID and try again."))
}
