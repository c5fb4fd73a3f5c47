use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// PUT /business/{code}
/// Edit the mutable fields: business type, area and contact.
#[tracing::instrument(name = "Update business.", skip(pool))]
#[put("/{code}")]
pub async fn item(
    path: web::Path<String>,
    web::Json(form): web::Json<forms::UpdateBusiness>,
    pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    let code = path.into_inner();

    db::business::update(
        pool.get_ref(),
        &code,
        form.business_type,
        form.area,
        form.contact,
    )
    .await
    .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
    .map(|business| JsonResponse::build().set_item(business).ok("Updated"))
    .ok_or_else(|| JsonResponse::not_found("Business not found"))
}
