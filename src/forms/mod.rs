mod business;
mod chat;
mod insight;
mod partner;

pub use business::*;
pub use chat::*;
pub use insight::*;
pub use partner::*;
