use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(min_length = 1)]
    #[validate(max_length = 2000)]
    pub message: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 80)]
    pub business_type: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 60)]
    pub state: String,
    #[validate(max_length = 80)]
    pub area: Option<String>,
    /// The insight payload the conversation is about, as returned by
    /// `/insights/generate`.
    pub insight: serde_json::Value,
    pub session_id: Option<String>,
    pub business_code: Option<String>,
}

impl ChatRequest {
    pub fn location(&self) -> String {
        match &self.area {
            Some(area) => format!("{}, {}", area, self.state),
            None => self.state.clone(),
        }
    }
}
