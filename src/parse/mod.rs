pub mod chat_log;
pub mod outline_parser;

pub use chat_log::{parse_chat_log, serialize_chat_log};
pub use outline_parser::parse_outline;
