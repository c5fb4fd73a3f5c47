use crate::services::locations::{states, NIGERIA_LOCATIONS};
use actix_web::{get, HttpResponse};
use serde_json::json;

/// GET /locations
/// Supported Nigerian states and their areas.
#[get("")]
pub async fn list() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "states": states(),
        "locations": &*NIGERIA_LOCATIONS,
    }))
}
