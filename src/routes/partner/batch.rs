use crate::connectors::InsightModel;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::Partner;
use crate::models::Insight;
use crate::services::insight;
use actix_web::{post, web, HttpResponse, Responder, Result};
use serde::Serialize;
use serde_json::json;
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct BatchItemResult {
    index: usize,
    business_type: String,
    state: String,
    area: Option<String>,
    insight: Insight,
}

#[derive(Debug, Serialize)]
struct BatchItemError {
    index: usize,
    business_type: String,
    error: String,
}

/// POST /api/insights/batch
/// Up to 5 businesses per request, one quota unit per item attempted.
#[tracing::instrument(name = "Partner batch insights.", skip(pool, model, partner))]
#[post("/insights/batch")]
pub async fn item(
    partner: Partner,
    web::Json(form): web::Json<forms::BatchInsightRequest>,
    pool: web::Data<PgPool>,
    model: web::Data<Arc<dyn InsightModel>>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    let mut results = Vec::new();
    let mut errors = Vec::new();

    for (index, request) in form.businesses.into_iter().enumerate() {
        if let Err(err) = request.validate() {
            errors.push(BatchItemError {
                index,
                business_type: request.business_type,
                error: err.to_string(),
            });
            continue;
        }

        let quota = db::partner::consume_quota(pool.get_ref(), partner.0.id, 1)
            .await
            .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;
        if quota.is_none() {
            errors.push(BatchItemError {
                index,
                business_type: request.business_type,
                error: "API quota exceeded".to_string(),
            });
            continue;
        }

        match insight::generate_and_store(pool.get_ref(), model.get_ref().as_ref(), &request)
            .await
        {
            Ok(stored) => results.push(BatchItemResult {
                index,
                business_type: request.business_type,
                state: request.state,
                area: request.area,
                insight: stored,
            }),
            Err(err) => {
                tracing::warn!(index, "Batch item failed: {}", err);
                errors.push(BatchItemError {
                    index,
                    business_type: request.business_type,
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(HttpResponse::Ok().json(json!({
        "successful": results.len(),
        "failed": errors.len(),
        "results": results,
        "errors": errors,
    })))
}
