use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{get, web, HttpResponse, Responder, Result};
use serde_json::json;
use sqlx::PgPool;

/// GET /analytics/summary
/// High-level usage totals. Public for the MVP.
#[tracing::instrument(name = "Analytics summary.", skip(pool))]
#[get("/summary")]
pub async fn summary(pool: web::Data<PgPool>) -> Result<impl Responder> {
    let total_insights = db::insight::count(pool.get_ref())
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;
    let total_businesses = db::business::count(pool.get_ref())
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;
    let total_chats = db::chat::count_user_messages(pool.get_ref())
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;
    let popular_states = db::insight::top_states(pool.get_ref(), 5)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({
        "total_insights_generated": total_insights,
        "total_businesses_saved": total_businesses,
        "total_chat_messages": total_chats,
        "popular_states": popular_states,
    })))
}
