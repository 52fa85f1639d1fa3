//! # API crate: HTTP client for the catalog service
//!
//! Every remote call the catalog client makes goes through [`ApiClient`]. It
//! knows the service origin, attaches the bearer token from the injected
//! [`SessionProvider`], and turns HTTP outcomes into [`ApiError`] values.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: public endpoints (`/token`, `/register`) and authenticated ones |
//! | [`error`] | [`ApiError`] taxonomy and the fallback messages for unreadable error bodies |
//!
//! ## Endpoints
//!
//! | Method | Path | Client method | Auth |
//! |--------|------|---------------|------|
//! | POST | `/token` | [`login`](ApiClient::login) | no (form-encoded) |
//! | POST | `/register` | [`register`](ApiClient::register) | no |
//! | GET | `/users/me` | [`current_user`](ApiClient::current_user), [`current_user_with_token`](ApiClient::current_user_with_token) | bearer |
//! | GET | `/products` | [`list_products`](ApiClient::list_products) | bearer |
//! | GET | `/my-products` | [`my_products`](ApiClient::my_products) | bearer |
//! | GET | `/products/{id}` | [`get_product`](ApiClient::get_product) | bearer |
//! | POST | `/assign-product` | [`assign_product`](ApiClient::assign_product) | bearer |
//! | DELETE | `/unassign-product/{id}` | [`unassign_product`](ApiClient::unassign_product) | bearer |
//!
//! The client never retries and never navigates. On a 401 from an
//! authenticated endpoint it clears the stored session and returns
//! [`ApiError::SessionExpired`]; deciding where to send the user is left to
//! the caller.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

pub use store::{
    ApiMessage, NewUser, Product, ProductId, Session, SessionProvider, TokenResponse, User,
};
