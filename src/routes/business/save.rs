use crate::db;
use crate::forms;
use crate::helpers::{business_code, JsonResponse};
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// POST /business
/// Register a business and mint its Business ID.
#[tracing::instrument(name = "Save business.", skip(pool))]
#[post("")]
pub async fn item(
    web::Json(form): web::Json<forms::SaveBusiness>,
    pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    let code = business_code::generate_code(
        pool.get_ref(),
        &form.business_name,
        &form.business_type,
        &form.state,
    )
    .await
    .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    let business = models::Business {
        code,
        name: form.business_name,
        business_type: form.business_type,
        state: form.state,
        area: form.area,
        contact: form.contact,
        ..Default::default()
    };

    let saved = db::business::insert(pool.get_ref(), business)
        .await
        .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    db::analytics::record(pool.get_ref(), "business_saved", Some(&saved.code), None).await;
    tracing::info!(code = %saved.code, "Registered new business");

    Ok(JsonResponse::build()
        .set_id(saved.code.clone())
        .set_item(saved)
        .created("Business saved. Keep your Business ID to access your insights anytime."))
}
