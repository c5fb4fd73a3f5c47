use crate::db;
use crate::helpers::JsonResponse;
use crate::models::ApiClient;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Extractor for the `/api` surface: resolves the `X-API-Key` header to an
/// active partner record. Quota is consumed by the handlers, not here, so a
/// batch can be charged per item.
#[derive(Debug)]
pub struct Partner(pub ApiClient);

impl FromRequest for Partner {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let api_key = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let pool = req.app_data::<web::Data<PgPool>>().cloned();

        Box::pin(async move {
            let api_key = api_key.ok_or_else(|| {
                JsonResponse::unauthorized("API key required. Contact us for access.")
            })?;
            let pool = pool.ok_or_else(|| {
                JsonResponse::internal_server_error("Database pool is not configured")
            })?;

            let client = db::partner::fetch_by_key(pool.get_ref(), &api_key)
                .await
                .map_err(|err| JsonResponse::internal_server_error(err.to_string()))?
                .ok_or_else(|| JsonResponse::forbidden("Invalid API key"))?;

            if client.status != ApiClient::STATUS_ACTIVE {
                tracing::info!(company = %client.company, status = %client.status,
                    "Rejected partner key that is not active");
                return Err(JsonResponse::forbidden("API key is not active"));
            }

            Ok(Partner(client))
        })
    }
}
