use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// Fixed-window request limiter. One instance guards one route group, owned
/// by the router rather than living in a process-global.
pub struct RateLimiter {
    max: u32,
    window: Duration,
    windows: Mutex<HashMap<String, (u32, Instant)>>,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Arc<Self> {
        Arc::new(Self {
            max,
            window,
            windows: Mutex::new(HashMap::new()),
        })
    }

    /// Record a hit for `client`. Past the ceiling, returns the seconds left
    /// in the current window.
    pub fn check(&self, client: &str) -> Result<(), u64> {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        // The key is attacker-influenced (X-Forwarded-For), so expired
        // windows are swept on every hit; keys never seen again must not
        // accumulate.
        windows.retain(|_, (_, start)| now.duration_since(*start) <= self.window);

        let entry = windows.entry(client.to_string()).or_insert((0, now));

        if entry.0 >= self.max {
            let retry_after = self
                .window
                .checked_sub(now.duration_since(entry.1))
                .unwrap_or_default()
                .as_secs();
            return Err(retry_after.max(1));
        }

        entry.0 += 1;
        Ok(())
    }
}

pub async fn limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match limiter.check(&client_key(&req)) {
        Ok(()) => Ok(next.run(req).await),
        Err(retry_after) => Err(ApiError::RateExceeded { retry_after }),
    }
}

/// Client identity for limiting: first X-Forwarded-For hop when behind a
/// proxy, otherwise the peer address.
fn client_key(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
