use crate::helpers::JsonResponse;
use crate::middleware::Partner;
use actix_web::{get, Responder, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Usage {
    pub company: String,
    pub requests_remaining: i64,
}

/// GET /api/usage
/// Remaining quota for the authenticated key.
#[tracing::instrument(name = "Partner usage.", skip(partner))]
#[get("/usage")]
pub async fn item(partner: Partner) -> Result<impl Responder> {
    Ok(JsonResponse::build()
        .set_item(Usage {
            company: partner.0.company,
            requests_remaining: partner.0.requests_remaining,
        })
        .ok("OK"))
}
