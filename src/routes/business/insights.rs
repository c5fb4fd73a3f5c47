use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

const DEFAULT_HISTORY_LIMIT: i64 = 10;
const MAX_HISTORY_LIMIT: i64 = 100;

/// GET /business/{code}/insights?limit=
/// Insight history for a business, newest first.
#[tracing::instrument(name = "List business insights.", skip(pool))]
#[get("/{code}/insights")]
pub async fn list(
    path: web::Path<String>,
    query: web::Query<forms::HistoryQuery>,
    pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    db::business::fetch(pool.get_ref(), &code)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
        .ok_or_else(|| JsonResponse::not_found("Business not found"))?;

    let insights = db::insight::list_for_business(pool.get_ref(), &code, limit)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    Ok(JsonResponse::build().set_list(insights).ok("OK"))
}
