use crate::connectors::InsightModel;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::Partner;
use crate::services::insight::{self, GenerateError};
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// POST /api/insights
/// Metered single-insight generation for partners.
#[tracing::instrument(name = "Partner generate insight.", skip(pool, model, partner))]
#[post("/insights")]
pub async fn item(
    partner: Partner,
    web::Json(form): web::Json<forms::InsightRequest>,
    pool: web::Data<PgPool>,
    model: web::Data<Arc<dyn InsightModel>>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    db::partner::consume_quota(pool.get_ref(), partner.0.id, 1)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
        .ok_or_else(|| JsonResponse::too_many_requests("API quota exceeded"))?;

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
