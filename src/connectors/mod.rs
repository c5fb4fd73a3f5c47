mod errors;
mod gemini;

pub use errors::ConnectorError;
pub use gemini::{GeminiClient, InsightModel};
