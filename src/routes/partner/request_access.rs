use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use actix_web::{post, web, HttpResponse, Responder, Result};
use rand::Rng;
use serde_json::json;
use serde_valid::Validate;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Derive a partner API key from the applicant's email plus a random nonce.
fn make_api_key(email: &str) -> String {
    let nonce: [u8; 8] = rand::thread_rng().gen();

    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(nonce);
    let digest = hasher.finalize();

    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// POST /api/request-access
/// Register a pending partner. The key is activated (and the quota set) out
/// of band, and delivered by email.
#[tracing::instrument(name = "Partner access request.", skip(pool))]
#[post("/request-access")]
pub async fn item(
    web::Json(form): web::Json<forms::AccessRequest>,
    pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    form.validate()
        .map_err(|err| JsonResponse::bad_request(err.to_string()))?;

    let api_key = make_api_key(&form.email);

    let client = db::partner::insert(
        pool.get_ref(),
        &api_key,
        &form.company_name,
        &form.email,
        &form.use_case,
    )
    .await
    .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?;

    tracing::info!(company = %client.company, "Recorded partner access request");

    Ok(HttpResponse::Accepted().json(json!({
        "message": "API access request received",
        "company": client.company,
        "email": client.email,
        "status": "pending_approval",
        "note": "You'll receive your API key via email within 24 hours",
    })))
}
