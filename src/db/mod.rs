pub mod analytics;
pub mod business;
pub mod chat;
pub mod insight;
pub mod partner;
