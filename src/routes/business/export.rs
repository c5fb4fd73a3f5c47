use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{get, web, HttpResponse, Responder, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

/// GET /business/{code}/export
/// Full JSON export of a business and its insight history, for backup or
/// migration.
#[tracing::instrument(name = "Export business data.", skip(pool))]
#[get("/{code}/export")]
pub async fn item(path: web::Path<String>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let code = path.into_inner();

    let business = db::business::fetch(pool.get_ref(), &code)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
        .ok_or_else(|| JsonResponse::not_found("Business not found"))?;

    let insights = db::insight::list_all_for_business(pool.get_ref(), &code)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    db::analytics::record(pool.get_ref(), "data_exported", Some(&code), None).await;

    Ok(HttpResponse::Ok().json(json!({
        "business": business,
        "insights": insights,
        "exported_at": Utc::now(),
    })))
}
