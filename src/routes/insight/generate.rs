use crate::connectors::InsightModel;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::insight::{self, GenerateError};
use actix_web::{post, web, Responder, Result};
use serde_json::json;
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// POST /insights/generate
/// The main endpoint: prompt the model with search grounding, parse the
/// payload and persist it. No authentication required.
#[tracing::instrument(name = "Generate insight.", skip(pool, model))]
#[post("/generate")]
pub async fn item(
    web::Json(form): web::Json<forms::InsightRequest>,
    pool: web::Data<PgPool>,
    model: web::Data<Arc<dyn InsightModel>>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    db::analytics::record(
        pool.get_ref(),
        "insight_generated",
        form.business_code.as_deref(),
        Some(json!({
            "business_type": form.business_type,
            "state": form.state,
            "area": form.area,
        })),
    )
    .await;

    match insight::generate_and_store(pool.get_ref(), model.get_ref().as_ref(), &form).await {
        Ok(stored) => Ok(JsonResponse::build()
            .set_id(stored.id.to_string())
            .set_item(stored)
            .ok("Generated")),
        Err(GenerateError::UnknownBusiness(code)) => {
            Err(JsonResponse::not_found(format!("Business {} not found", code)))
        }
        Err(GenerateError::Model(err)) => Err(err.into()),
        Err(GenerateError::Database(err)) => {
            Err(JsonResponse::internal_server_error(err.to_string()))
        }
    }
}
