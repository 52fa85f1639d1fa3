//! Remote capabilities the orchestration layer depends on.
//!
//! [`CatalogApi`] and [`AuthApi`] are implemented by [`api::ApiClient`] and by
//! in-memory fakes in tests. Implementations follow the client's contract:
//! a `SessionExpired` error means the stored session has already been cleared.

use std::future::Future;

use api::{
    ApiClient, ApiError, ApiMessage, NewUser, Product, ProductId, SessionProvider, TokenResponse,
    User,
};

/// Catalog reads and assignment mutations.
pub trait CatalogApi {
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn my_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn get_product(&self, id: ProductId) -> impl Future<Output = Result<Product, ApiError>>;
    fn assign_product(&self, id: ProductId) -> impl Future<Output = Result<ApiMessage, ApiError>>;
    fn unassign_product(&self, id: ProductId) -> impl Future<Output = Result<ApiMessage, ApiError>>;
}

/// Credential exchange and account creation.
pub trait AuthApi {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>>;
    fn register(&self, new_user: &NewUser) -> impl Future<Output = Result<User, ApiError>>;
    fn current_user_with_token(&self, token: &str) -> impl Future<Output = Result<User, ApiError>>;
}

impl<P: SessionProvider> CatalogApi for ApiClient<P> {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        ApiClient::list_products(self).await
    }

    async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        ApiClient::my_products(self).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        ApiClient::get_product(self, id).await
    }

    async fn assign_product(&self, id: ProductId) -> Result<ApiMessage, ApiError> {
        ApiClient::assign_product(self, id).await
    }

    async fn unassign_product(&self, id: ProductId) -> Result<ApiMessage, ApiError> {
        ApiClient::unassign_product(self, id).await
    }
}

impl<P: SessionProvider> AuthApi for ApiClient<P> {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        ApiClient::login(self, username, password).await
    }

    async fn register(&self, new_user: &NewUser) -> Result<User, ApiError> {
        ApiClient::register(self, new_user).await
    }

    async fn current_user_with_token(&self, token: &str) -> Result<User, ApiError> {
        ApiClient::current_user_with_token(self, token).await
    }
}

impl<T: CatalogApi + ?Sized> CatalogApi for &T {
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> {
        (**self).list_products()
    }

    fn my_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> {
        (**self).my_products()
    }

    fn get_product(&self, id: ProductId) -> impl Future<Output = Result<Product, ApiError>> {
        (**self).get_product(id)
    }

    fn assign_product(&self, id: ProductId) -> impl Future<Output = Result<ApiMessage, ApiError>> {
        (**self).assign_product(id)
    }

    fn unassign_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<ApiMessage, ApiError>> {
        (**self).unassign_product(id)
    }
}

impl<T: AuthApi + ?Sized> AuthApi for &T {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>> {
        (**self).login(username, password)
    }

    fn register(&self, new_user: &NewUser) -> impl Future<Output = Result<User, ApiError>> {
        (**self).register(new_user)
    }

    fn current_user_with_token(&self, token: &str) -> impl Future<Output = Result<User, ApiError>> {
        (**self).current_user_with_token(token)
    }
}
