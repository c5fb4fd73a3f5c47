use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered business. The `code` is the 8-character Business ID issued at
/// signup and used in lieu of a password on every later request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Business {
    pub code: String,
    pub name: String,
    pub business_type: String,
    pub state: String,
    pub area: Option<String>,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Business {
    pub fn location(&self) -> String {
        match &self.area {
            Some(area) => format!("{}, {}", area, self.state),
            None => self.state.clone(),
        }
    }
}
