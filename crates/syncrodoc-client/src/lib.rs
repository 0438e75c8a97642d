pub mod client;
pub mod error;
pub mod session;

pub use client::AuthClient;
pub use error::ClientError;
pub use session::{SessionCache, SessionEntry};
