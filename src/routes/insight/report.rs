use crate::db;
use crate::helpers::JsonResponse;
use crate::services::insight::render_report;
use actix_web::{get, web, HttpResponse, Responder, Result};
use sqlx::PgPool;

/// GET /insights/{id}/report
/// Plain-text download of a stored insight.
#[tracing::instrument(name = "Render insight report.", skip(pool))]
#[get("/{id}/report")]
pub async fn item(path: web::Path<i32>, pool: web::Data<PgPool>) -> Result<impl Responder> {
    let id = path.into_inner();

    let insight = db::insight::fetch(pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
        .ok_or_else(|| JsonResponse::not_found("Insight not found"))?;

    let filename = format!(
        "kiomate_{}_{}.txt",
        insight.business_code.as_deref().unwrap_or("insight"),
        insight.generated_at.format("%Y%m%d")
    );

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(render_report(&insight)))
}
