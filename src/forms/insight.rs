use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InsightRequest {
    #[validate(min_length = 2)]
    #[validate(max_length = 80)]
    pub business_type: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 60)]
    pub state: String,
    #[validate(max_length = 80)]
    pub area: Option<String>,
    /// Attach the insight to a saved business when present.
    pub business_code: Option<String>,
}

impl InsightRequest {
    pub fn location(&self) -> String {
        match &self.area {
            Some(area) => format!("{}, {}", area, self.state),
            None => self.state.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BatchInsightRequest {
    #[validate(min_items = 1)]
    #[validate(max_items = 5)]
    pub businesses: Vec<InsightRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}
