pub mod delete;
pub mod export;
pub mod get;
pub mod insights;
pub mod save;
pub mod update;
