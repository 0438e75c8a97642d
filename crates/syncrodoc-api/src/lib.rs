pub mod auth;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod password;
pub mod rate_limit;
pub mod router;
pub mod token;

use std::sync::Arc;

use syncrodoc_db::Database;

use crate::token::TokenIssuer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenIssuer,
}
