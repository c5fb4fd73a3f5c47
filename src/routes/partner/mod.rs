pub mod batch;
pub mod insights;
pub mod request_access;
pub mod usage;
