//! Standalone product page (`/dashboard/{id}`).
//!
//! Unlike the detail view inside the catalog, this page has no cached list to
//! fall back on: any failure renders the "not found" placeholder.

use store::{Product, ProductId, SessionProvider};

use crate::navigation::{Navigator, Route};
use crate::service::CatalogApi;

pub const NOT_FOUND: &str = "Product not found.";
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Clone, Debug, PartialEq)]
pub enum ProductPage {
    Loaded(Product),
    NotFound,
    /// No session; the navigator was sent to the login screen.
    LoginRequired,
}

/// Description text for display.
pub fn description(product: &Product) -> &str {
    product
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION)
}

/// Parse an id from a route segment. Zero and non-numbers are rejected.
pub fn parse_product_id(raw: &str) -> Option<ProductId> {
    raw.parse::<ProductId>().ok().filter(|id| id.0 != 0)
}

pub async fn load_product_page<A, S, N>(
    api: &A,
    session: &S,
    navigator: &N,
    raw_id: &str,
) -> ProductPage
where
    A: CatalogApi,
    S: SessionProvider,
    N: Navigator,
{
    if !session.is_authenticated() {
        navigator.navigate(Route::Login);
        return ProductPage::LoginRequired;
    }

    let Some(id) = parse_product_id(raw_id) else {
        tracing::warn!("Invalid product ID: {:?}", raw_id);
        return ProductPage::NotFound;
    };

    match api.get_product(id).await {
        Ok(product) => ProductPage::Loaded(product),
        Err(e) => {
            tracing::warn!("Failed to fetch product {}: {}", id, e);
            if e.requires_login() {
                navigator.navigate(Route::Login);
                return ProductPage::LoginRequired;
            }
            ProductPage::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::testing::{product, FakeApi, Failure};
    use store::{MemoryStore, SessionStore, User};

    fn setup() -> (FakeApi, SessionStore<MemoryStore>, RecordingNavigator) {
        let api = FakeApi::with_catalog(vec![product(3, "Financial Metrics", "Financial")], &[]);
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.set_session("tok", &User::named("alice"));
        (api, sessions, RecordingNavigator::new())
    }

    #[tokio::test]
    async fn test_loads_product() {
        let (api, sessions, nav) = setup();
        let page = load_product_page(&api, &sessions, &nav, "3").await;
        match page {
            ProductPage::Loaded(p) => {
                assert_eq!(p.name, "Financial Metrics");
                assert_eq!(description(&p), "Financial Metrics dataset");
            }
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_id_makes_no_request() {
        let (api, sessions, nav) = setup();
        assert_eq!(load_product_page(&api, &sessions, &nav, "abc").await, ProductPage::NotFound);
        assert_eq!(load_product_page(&api, &sessions, &nav, "0").await, ProductPage::NotFound);
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failures_show_not_found() {
        let (api, sessions, nav) = setup();
        assert_eq!(load_product_page(&api, &sessions, &nav, "77").await, ProductPage::NotFound);

        api.fail("product", Failure::Server);
        assert_eq!(load_product_page(&api, &sessions, &nav, "3").await, ProductPage::NotFound);
        assert!(nav.routes().is_empty());
    }

    #[tokio::test]
    async fn test_requires_session() {
        let (api, _, nav) = setup();
        let empty = SessionStore::new(MemoryStore::new());
        assert_eq!(
            load_product_page(&api, &empty, &nav, "3").await,
            ProductPage::LoginRequired
        );
        assert_eq!(nav.routes(), vec![Route::Login]);
    }

    #[test]
    fn test_missing_description() {
        let mut p = product(1, "A", "B");
        p.description = None;
        assert_eq!(description(&p), NO_DESCRIPTION);
        p.description = Some(String::new());
        assert_eq!(description(&p), NO_DESCRIPTION);
    }
}
