use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState, auth,
    middleware::require_auth,
    rate_limit::{self, RateLimiter},
};

/// Per-endpoint request ceilings. `None` at the router level disables
/// limiting entirely (tests run without it).
#[derive(Debug, Clone, Copy)]
pub struct RateLimits {
    pub login_max: u32,
    pub login_window: Duration,
    pub register_max: u32,
    pub register_window: Duration,
    pub general_max: u32,
    pub general_window: Duration,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            login_max: 5,
            login_window: Duration::from_secs(15 * 60),
            register_max: 3,
            register_window: Duration::from_secs(60 * 60),
            general_max: 100,
            general_window: Duration::from_secs(15 * 60),
        }
    }
}

pub fn router(state: AppState, limits: Option<RateLimits>) -> Router {
    let mut login_route = Router::new().route("/api/auth/login", post(auth::login));
    let mut register_route = Router::new().route("/api/auth/register", post(auth::register));

    if let Some(limits) = limits {
        login_route = login_route.layer(middleware::from_fn_with_state(
            RateLimiter::new(limits.login_max, limits.login_window),
            rate_limit::limit,
        ));
        register_route = register_route.layer(middleware::from_fn_with_state(
            RateLimiter::new(limits.register_max, limits.register_window),
            rate_limit::limit,
        ));
    }

    let public = Router::new()
        .merge(login_route)
        .merge(register_route)
        .route("/api/health", get(auth::health));

    let protected = Router::new()
        .route("/api/auth/verify", post(auth::verify))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/profile", get(auth::profile))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let mut app = Router::new().merge(public).merge(protected);

    if let Some(limits) = limits {
        app = app.layer(middleware::from_fn_with_state(
            RateLimiter::new(limits.general_max, limits.general_window),
            rate_limit::limit,
        ));
    }

    app.with_state(state)
}
