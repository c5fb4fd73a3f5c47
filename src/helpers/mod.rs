pub mod business_code;
pub(crate) mod json;

pub use json::*;
