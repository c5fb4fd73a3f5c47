use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A partner (fintech) holding a metered API key for the `/api` surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApiClient {
    pub id: i32,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub company: String,
    pub email: String,
    pub use_case: String,
    pub status: String,
    pub requests_remaining: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApiClient {
    pub const STATUS_PENDING: &'static str = "pending";
    pub const STATUS_ACTIVE: &'static str = "active";
    pub const STATUS_DISABLED: &'static str = "disabled";
}
