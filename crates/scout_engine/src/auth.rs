use reqwest::Method;
use scout_core::{
    LoginRequest, PasswordResetRequest, PasswordUpdate, ProfileUpdate, RegisterRequest, User,
};
use serde::{Deserialize, Serialize};

use crate::client::{decode, Payload};
use crate::{ApiClient, ApiError};

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct StatusMessage {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// `GET /sanctum/csrf-cookie`: primes the XSRF token before a state-changing
    /// session request.
    pub async fn csrf_cookie(&self) -> Result<(), ApiError> {
        let url = self.root_url(&["sanctum", "csrf-cookie"])?;
        self.execute(self.request(Method::GET, url)).await?;
        Ok(())
    }

    /// `GET {api}/user`.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let url = self.api_url(&["user"])?;
        let builder = self.request(Method::GET, url);
        Ok(self.fetch::<Payload<User>>(builder).await?.into_inner())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        self.csrf_cookie().await?;
        let url = self.root_url(&["login"])?;
        self.execute(self.request(Method::POST, url).json(request))
            .await?;
        self.current_user().await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.csrf_cookie().await?;
        let url = self.root_url(&["register"])?;
        self.execute(self.request(Method::POST, url).json(request))
            .await?;
        self.current_user().await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.root_url(&["logout"])?;
        self.execute(self.request(Method::POST, url)).await?;
        Ok(())
    }

    /// Requests a reset link; returns the server's status message, if any.
    pub async fn forgot_password(&self, email: &str) -> Result<Option<String>, ApiError> {
        self.csrf_cookie().await?;
        let url = self.root_url(&["forgot-password"])?;
        let body = self
            .execute(self.request(Method::POST, url).json(&EmailBody { email }))
            .await?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(decode::<StatusMessage>(&body)
            .ok()
            .and_then(|status| status.message))
    }

    pub async fn reset_password(&self, request: &PasswordResetRequest) -> Result<(), ApiError> {
        self.csrf_cookie().await?;
        let url = self.root_url(&["reset-password"])?;
        self.execute(self.request(Method::POST, url).json(request))
            .await?;
        Ok(())
    }

    /// Updates name and email, then returns the refreshed user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let url = self.root_url(&["user", "profile-information"])?;
        self.execute(self.request(Method::PUT, url).json(update))
            .await?;
        self.current_user().await
    }

    pub async fn update_password(&self, update: &PasswordUpdate) -> Result<(), ApiError> {
        let url = self.root_url(&["user", "password"])?;
        self.execute(self.request(Method::PUT, url).json(update))
            .await?;
        Ok(())
    }
}
