use actix_web::{get, HttpResponse};
use serde_json::json;

#[get("/health_check")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[get("/")]
pub async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "KioMate API",
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
