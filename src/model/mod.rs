pub mod chat;
pub mod config;
pub mod outline;
pub mod session;
pub mod study;

pub use chat::*;
pub use config::*;
pub use outline::*;
pub use session::*;
pub use study::*;
