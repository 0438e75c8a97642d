use reqwest::Client;
use serde::de::DeserializeOwned;

use syncrodoc_types::api::{
    AuthResponse, ErrorResponse, LoginRequest, ProfileResponse, RegisterRequest, UserProfile,
};

use crate::error::ClientError;
use crate::session::{SessionCache, SessionEntry};

/// HTTP client for the auth API with browser-style session handling:
/// successful register/login store the token, authenticated calls attach it,
/// logout discards it.
pub struct AuthClient {
    http: Client,
    base_url: String,
    cache: SessionCache,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, cache: SessionCache) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            cache,
        }
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn is_authenticated(&self) -> bool {
        self.cache.has_token()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserProfile, ClientError> {
        let req = RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        };
        let resp = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&req)
            .send()
            .await?;
        let auth: AuthResponse = parse(resp).await?;

        self.cache.save(&SessionEntry {
            token: auth.token,
            user: auth.user.clone(),
        })?;
        Ok(auth.user)
    }

    /// `identifier` may be the username or the email.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<UserProfile, ClientError> {
        let req = LoginRequest {
            username: identifier.into(),
            password: password.into(),
        };
        let resp = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&req)
            .send()
            .await?;
        let auth: AuthResponse = parse(resp).await?;

        self.cache.save(&SessionEntry {
            token: auth.token,
            user: auth.user.clone(),
        })?;
        Ok(auth.user)
    }

    /// Best-effort server notification; the local session is cleared no
    /// matter what the server says (or whether it can be reached at all).
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(token) = self.cache.token() {
            let _ = self
                .http
                .post(self.url("/api/auth/logout"))
                .bearer_auth(token)
                .send()
                .await;
        }
        self.cache.clear()
    }

    /// Ask the server whether the cached token is still good. False on any
    /// failure, including transport errors.
    pub async fn verify(&self) -> bool {
        let Some(token) = self.cache.token() else {
            return false;
        };
        match self
            .http
            .post(self.url("/api/auth/verify"))
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        let token = self.cache.token().ok_or(ClientError::NoSession)?;
        let resp = self
            .http
            .get(self.url("/api/auth/profile"))
            .bearer_auth(token)
            .send()
            .await?;
        let profile: ProfileResponse = parse(resp).await?;
        Ok(profile.user)
    }

    /// Startup path: a cached token is only trusted after the server
    /// revalidates it. A stale or tampered record is cleared, not honored.
    pub async fn restore_session(&self) -> Result<Option<UserProfile>, ClientError> {
        if !self.cache.has_token() {
            return Ok(None);
        }
        if self.verify().await {
            Ok(self.cache.load().map(|entry| entry.user))
        } else {
            self.cache.clear()?;
            Ok(None)
        }
    }
}

async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
