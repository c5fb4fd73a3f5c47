use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SaveBusiness {
    #[validate(min_length = 2)]
    #[validate(max_length = 120)]
    pub business_name: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 80)]
    pub business_type: String,
    #[validate(min_length = 2)]
    #[validate(max_length = 60)]
    pub state: String,
    #[validate(max_length = 80)]
    pub area: Option<String>,
    #[validate(max_length = 120)]
    pub contact: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBusiness {
    #[validate(min_length = 2)]
    #[validate(max_length = 80)]
    pub business_type: Option<String>,
    #[validate(max_length = 80)]
    pub area: Option<String>,
    #[validate(max_length = 120)]
    pub contact: Option<String>,
}
