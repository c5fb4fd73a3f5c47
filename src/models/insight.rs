use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored market insight. Immutable once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Insight {
    pub id: i32,
    pub business_code: Option<String>,
    pub business_type: String,
    pub state: String,
    pub area: Option<String>,
    pub peak_hours: String,
    pub competition: String,
    pub price_sensitivity: String,
    pub quick_wins: serde_json::Value,
    pub customer_profile: String,
    pub competitive_landscape: String,
    pub growth_opportunity: String,
    pub data_note: String,
    pub grounded: bool,
    pub generated_at: DateTime<Utc>,
}

impl Insight {
    pub fn location(&self) -> String {
        match &self.area {
            Some(area) => format!("{}, {}", area, self.state),
            None => self.state.clone(),
        }
    }

    pub fn quick_wins_list(&self) -> Vec<String> {
        self.quick_wins
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
