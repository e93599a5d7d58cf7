use reqwest::{Response, StatusCode};
use shared::{
    domain::Session,
    error::{AuthError, AuthErrorKind},
    protocol::{Credentials, LoginResponse, RegisterResponse},
};
use tracing::{info, warn};

use crate::http::{error_message, HttpBackend};

impl HttpBackend {
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let response = self.post_credentials("auth/register", username, password).await?;
        if response.status().is_success() {
            let body: RegisterResponse = response.json().await.map_err(|error| {
                warn!(%error, "auth: malformed register payload");
                AuthError::unreachable()
            })?;
            if !body.success {
                return Err(AuthError::new(AuthErrorKind::Rejected, "Registration failed"));
            }
            info!(username, "auth: registered");
            return Ok(());
        }
        Err(rejection(response, "Registration failed").await)
    }

    /// `POST /auth/login`, yielding the session to thread into cart calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let response = self.post_credentials("auth/login", username, password).await?;
        if response.status().is_success() {
            let body: LoginResponse = response.json().await.map_err(|error| {
                warn!(%error, "auth: malformed login payload");
                AuthError::unreachable()
            })?;
            if !body.success || body.token.is_empty() {
                return Err(AuthError::new(AuthErrorKind::Rejected, "Login failed"));
            }
            info!(username = %body.username, "auth: logged in");
            return Ok(Session {
                token: body.token,
                username: body.username,
                balance: body.balance,
            });
        }
        Err(rejection(response, "Login failed").await)
    }

    async fn post_credentials(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> Result<Response, AuthError> {
        self.http
            .post(self.url(path))
            .json(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|error| {
                warn!(%error, path, "auth: backend unreachable");
                AuthError::unreachable()
            })
    }
}

async fn rejection(response: Response, fallback: &str) -> AuthError {
    let status = response.status();
    if status == StatusCode::BAD_REQUEST {
        return AuthError::new(AuthErrorKind::Rejected, error_message(response, fallback).await);
    }
    warn!(status = status.as_u16(), "auth: unexpected status");
    AuthError::unreachable()
}
