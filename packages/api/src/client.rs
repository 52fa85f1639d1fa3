//! [`ApiClient`]: one method per catalog endpoint.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use store::{
    ApiMessage, CatalogConfig, ErrorBody, NewUser, Product, ProductId, SessionProvider,
    TokenResponse, User,
};

use crate::error::{ApiError, GENERIC_FAILURE, UNREADABLE_FAILURE};

/// HTTP client for the catalog service.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted,
/// and the session provider is cloned as well.
#[derive(Clone, Debug)]
pub struct ApiClient<P> {
    http: reqwest::Client,
    base_url: String,
    session: P,
}

impl<P: SessionProvider> ApiClient<P> {
    pub fn new(base_url: impl Into<String>, session: P) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn from_config(config: &CatalogConfig, session: P) -> Self {
        Self::new(config.api.base_url.clone(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &P {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send an authenticated request and decode the JSON response.
    ///
    /// Fails with [`ApiError::Unauthenticated`] before touching the network
    /// when no session is stored. A 401 clears the session.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let Some(session) = self.session.get_session() else {
            tracing::debug!("{} {} refused: no session", method, path);
            return Err(ApiError::Unauthenticated);
        };

        tracing::debug!("{} {}", method, path);
        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .header(AUTHORIZATION, session.bearer());
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, path, e);
            ApiError::Network(e)
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} {} rejected the session token", method, path);
            self.session.clear_session();
            return Err(ApiError::SessionExpired);
        }

        read_json(response).await
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        tracing::debug!("POST /token for {}", username);
        let response = self
            .http
            .post(self.url("/token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        read_json(response).await
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, new_user: &NewUser) -> Result<User, ApiError> {
        tracing::debug!("POST /register for {}", new_user.username);
        let response = self
            .http
            .post(self.url("/register"))
            .json(new_user)
            .send()
            .await?;
        read_json(response).await
    }

    /// Fetch the profile for a token that is not stored yet.
    ///
    /// Used right after login; a rejected token here is a plain
    /// `RequestFailed` because there is no session to expire.
    pub async fn current_user_with_token(&self, token: &str) -> Result<User, ApiError> {
        tracing::debug!("GET /users/me with a fresh token");
        let response = self
            .http
            .get(self.url("/users/me"))
            .bearer_auth(token)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request(Method::GET, "/users/me", None).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request(Method::GET, "/products", None).await
    }

    pub async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request(Method::GET, "/my-products", None).await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.request(Method::GET, &format!("/products/{id}"), None).await
    }

    pub async fn assign_product(&self, id: ProductId) -> Result<ApiMessage, ApiError> {
        let body = json!({ "product_id": id });
        self.request(Method::POST, "/assign-product", Some(body)).await
    }

    pub async fn unassign_product(&self, id: ProductId) -> Result<ApiMessage, ApiError> {
        let path = format!("/unassign-product/{id}");
        self.request(Method::DELETE, &path, None).await
    }
}

/// Decode a 2xx body, or turn a non-2xx response into `RequestFailed`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = error_message(response).await;
        tracing::warn!("HTTP {}: {}", status, message);
        return Err(ApiError::request_failed(status, message));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Human-readable message from an error body.
async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body
            .detail
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        // JSON, but `detail` is not a string (validation errors carry a list)
        Err(_) if serde_json::from_str::<serde_json::Value>(&text).is_ok() => {
            GENERIC_FAILURE.to_string()
        }
        Err(_) => UNREADABLE_FAILURE.to_string(),
    }
}
