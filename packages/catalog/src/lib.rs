//! # Catalog crate: orchestration for the data catalog client
//!
//! Sits between the HTTP client ([`api`]) and whatever renders the catalog.
//! Everything here is driven through injected capabilities so it runs without
//! a browser, a terminal or a live service:
//!
//! | Capability | Trait | Production implementation |
//! |------------|-------|---------------------------|
//! | Remote catalog | [`CatalogApi`], [`AuthApi`] | [`api::ApiClient`] |
//! | Session | [`store::SessionProvider`] | [`store::SessionStore`] |
//! | Navigation | [`Navigator`] | supplied by the front end |
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`controller`] | [`CatalogController`]: initial load, tabs, search, detail view, assign/unassign |
//! | [`filter`] | Pure search/category derivation |
//! | [`auth`] | [`AuthFlow`]: login, registration, logout |
//! | [`product_page`] | Standalone product page with a not-found placeholder |
//! | [`resource`] | [`Resource`] tagged async state |
//! | [`notifications`] | Transient notices for the user |
//! | [`navigation`] | [`Route`] and [`Navigator`] |

pub mod auth;
pub mod controller;
pub mod filter;
pub mod navigation;
pub mod notifications;
pub mod product_page;
pub mod resource;
pub mod service;

#[cfg(test)]
mod testing;

pub use auth::{AuthError, AuthFlow};
pub use controller::{
    CatalogController, CatalogPhase, MutationKind, MutationOutcome, ProductDetail, Tab,
};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use notifications::{NoticeLevel, Notification};
pub use product_page::{load_product_page, ProductPage};
pub use resource::Resource;
pub use service::{AuthApi, CatalogApi};
