use std::sync::LazyLock;

use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use regex::Regex;
use tokio::task;
use tracing::{error, info};

use syncrodoc_db::models::UserRow;
use syncrodoc_types::api::{
    AuthResponse, Claims, HealthResponse, LoginRequest, MessageResponse, ProfileResponse,
    RegisterRequest, UserProfile, VerifyResponse,
};

use crate::{AppState, error::ApiError, extract::Json, password};

/// Basic syntactic check only: something, an @, something, a dot, something.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

const MIN_PASSWORD_LEN: usize = 8;

fn profile_of(user: UserRow) -> UserProfile {
    UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: Some(user.created_at),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validation order: presence, email shape, confirmation, length.
    if req.username.is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(ApiError::Validation("All fields are required".into()));
    }
    if !EMAIL_RE.is_match(&req.email) {
        return Err(ApiError::Validation("Invalid email address".into()));
    }
    if req.password != req.confirm_password {
        return Err(ApiError::Validation("Passwords do not match".into()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    // bcrypt is CPU-bound; keep it off the I/O workers.
    let plaintext = req.password;
    let digest = task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            ApiError::Internal
        })?
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            ApiError::Internal
        })?;

    // UNIQUE constraints do the duplicate check atomically; a collision
    // comes back as DuplicateIdentity via the StoreError conversion.
    let user = state.db.create_user(&req.username, &req.email, &digest)?;

    let token = state
        .tokens
        .issue(user.id, &user.username, &user.email)
        .map_err(|e| {
            error!(error = %e, "token signing failed");
            ApiError::Internal
        })?;

    info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".into(),
            token,
            user: profile_of(user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Username/email and password are required".into(),
        ));
    }

    // The identifier may be either the username or the email. An unknown
    // identifier and a wrong password produce the same error.
    let user = state
        .db
        .find_by_identifier(&req.username)?
        .ok_or(ApiError::InvalidCredentials)?;

    let candidate = req.password;
    let digest = user.password_hash.clone();
    let valid = task::spawn_blocking(move || password::verify_password(&candidate, &digest))
        .await
        .map_err(|e| {
            error!(error = %e, "password verification task failed");
            ApiError::Internal
        })?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(user.id, &user.username, &user.email)
        .map_err(|e| {
            error!(error = %e, "token signing failed");
            ApiError::Internal
        })?;

    info!(user_id = user.id, "login succeeded");

    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token,
        user: profile_of(user),
    }))
}

/// The middleware already validated the token; echo the claims back.
pub async fn verify(Extension(claims): Extension<Claims>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token is valid".into(),
        user: claims.profile(),
    })
}

/// Stateless: tokens cannot be revoked before expiry, so logout only
/// confirms receipt. The client discards its copy.
pub async fn logout(Extension(_claims): Extension<Claims>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Logged out successfully".into(),
    })
}

pub async fn profile(Extension(claims): Extension<Claims>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: claims.profile(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        timestamp: Utc::now(),
    })
}
