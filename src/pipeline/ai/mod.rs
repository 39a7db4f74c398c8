pub mod extractor;
pub mod gemini;
pub mod parser;
pub mod prompt;
pub mod types;

pub use extractor::*;
pub use gemini::*;
pub use parser::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

/// Errors from the AI text service and its response handling. All of them
/// are recoverable: callers convert them into fallback values or
/// error-tagged messages, never a crash.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI service unreachable: {0}")]
    ServiceUnavailable(String),

    #[error("AI service returned an error: {0}")]
    Api(String),

    #[error("Prompt blocked by the service safety filter: {0}")]
    Blocked(String),

    #[error("Empty response from AI service")]
    EmptyResponse,

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
}
