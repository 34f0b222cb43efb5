//! The generation boundary: prompt construction, the chat-completions
//! client, and lenient parsing of the model's structured output.

pub mod client;
pub mod parse;
pub mod prompt;

pub use client::ChatCompletionsClient;
pub use parse::parse_rules;
pub use prompt::build_prompt;
