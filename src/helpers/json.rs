use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_derive::Serialize;

/// Uniform response envelope for all handlers.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    pub(crate) id: Option<String>,
    pub(crate) item: Option<T>,
    pub(crate) list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T> {
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T: serde::Serialize> JsonResponse<T> {
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T: serde::Serialize> JsonResponseBuilder<T> {
    pub fn set_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn into_response(self, status: StatusCode, message: impl Into<String>) -> HttpResponse {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Success".to_string()
        } else {
            message
        };
        HttpResponse::build(status).json(JsonResponse {
            status: "OK".to_string(),
            message,
            code: status.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
        })
    }

    pub fn ok(self, message: impl Into<String>) -> HttpResponse {
        self.into_response(StatusCode::OK, message)
    }

    pub fn created(self, message: impl Into<String>) -> HttpResponse {
        self.into_response(StatusCode::CREATED, message)
    }
}

impl JsonResponse<String> {
    fn error(status: StatusCode, message: String) -> actix_web::Error {
        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string()
        } else {
            message
        };
        let body: JsonResponse<String> = JsonResponse {
            status: "Error".to_string(),
            message: message.clone(),
            code: status.as_u16() as u32,
            id: None,
            item: None,
            list: None,
        };
        InternalError::from_response(message, HttpResponse::build(status).json(body)).into()
    }

    pub fn bad_request(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::UNAUTHORIZED, message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::FORBIDDEN, message.into())
    }

    pub fn not_found(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::NOT_FOUND, message.into())
    }

    pub fn too_many_requests(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::TOO_MANY_REQUESTS, message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::BAD_GATEWAY, message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> actix_web::Error {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}
