use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatTurn {
    pub id: i32,
    pub session_id: String,
    pub business_code: Option<String>,
    pub role: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub const ROLE_USER: &'static str = "user";
    pub const ROLE_ASSISTANT: &'static str = "assistant";
}
