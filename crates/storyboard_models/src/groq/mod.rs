//! Groq LPU inference, used for structured JSON output.

mod driver;

pub use driver::{DEFAULT_GROQ_MODEL, GROQ_CHAT_URL, GroqDriver};
