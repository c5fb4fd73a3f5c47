pub mod analytics;
pub mod business;
pub mod chat;
pub mod health_checks;
pub mod insight;
pub mod locations;
pub mod partner;

pub use health_checks::*;
