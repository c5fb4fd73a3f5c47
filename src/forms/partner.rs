use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AccessRequest {
    #[validate(min_length = 2)]
    #[validate(max_length = 120)]
    pub company_name: String,
    #[validate(min_length = 5)]
    #[validate(max_length = 120)]
    pub email: String,
    #[validate(min_length = 5)]
    #[validate(max_length = 1000)]
    pub use_case: String,
}
