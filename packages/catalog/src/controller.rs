//! # Catalog controller
//!
//! Orchestrates the catalog screen: fetching every product and the user's
//! assigned subset, deriving the visible list, fetching single products for
//! the detail view, and assigning / unassigning products.
//!
//! ## Phases
//!
//! ```text
//! Idle ──load──▶ Loading ──both reads ok──▶ Ready ◀──▶ Mutating
//!                   │
//!                   └──either read fails──▶ Failed (both collections empty)
//! ```
//!
//! Detail fetches run beside these phases and have their own [`Resource`].
//!
//! ## Concurrency
//!
//! All state sits in one `RefCell` that is never borrowed across an await.
//! Methods take `&self`, so several intents can be in flight on the same
//! thread (e.g. two button presses joined on one task). Only one assignment
//! mutation may run at a time; a second one returns
//! [`MutationOutcome::Blocked`] without calling the service. Detail responses
//! carry a generation number and are dropped if the detail view was closed or
//! replaced while they were in flight. Dropping an in-flight mutation or
//! detail future releases the slot it held, so a dismissed view never leaves
//! the controller stuck in `Mutating` or with a detail stuck in `Loading`.
//!
//! ## Errors
//!
//! Every service failure is turned into a [`Notification`] here. An expired
//! or missing session additionally navigates to [`Route::Login`], once per
//! failing intent.

use std::cell::RefCell;

use api::ApiError;
use store::{Product, ProductId, SessionProvider};

use crate::filter;
use crate::navigation::{Navigator, Route};
use crate::notifications::{NoticeLevel, Notification, Notifications};
use crate::resource::Resource;
use crate::service::CatalogApi;

pub const LOAD_FAILED: &str = "Failed to load products. Please try again later.";
pub const DETAIL_FAILED: &str = "Failed to fetch product details";
pub const SHOWING_CACHED: &str = "Showing cached data. Some information may be outdated.";
pub const ASSIGNED: &str = "Product added to your catalog";
pub const ASSIGN_FAILED: &str = "Failed to add product. Please try again.";
pub const UNASSIGNED: &str = "Product removed from your catalog";
pub const UNASSIGN_FAILED: &str = "Failed to remove product. Please try again.";

/// Which collection feeds the filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Mine,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogPhase {
    Idle,
    Loading,
    Ready,
    Mutating,
    Failed(String),
}

/// Product shown in the detail view.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    /// Taken from the cached list because the fresh fetch failed.
    pub stale: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Assign,
    Unassign,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    Done,
    Failed,
    /// Another mutation was in flight; nothing was sent.
    Blocked,
}

#[derive(Debug, Default)]
struct CatalogState {
    all_products: Resource<Vec<Product>>,
    my_products: Resource<Vec<Product>>,
    detail: Resource<ProductDetail>,
    detail_generation: u64,
    action: Option<(MutationKind, ProductId)>,
    tab: Tab,
    search: String,
    category: Option<String>,
    notifications: Notifications,
}

pub struct CatalogController<A, S, N> {
    api: A,
    session: S,
    navigator: N,
    state: RefCell<CatalogState>,
}

impl<A, S, N> CatalogController<A, S, N>
where
    A: CatalogApi,
    S: SessionProvider,
    N: Navigator,
{
    pub fn new(api: A, session: S, navigator: N) -> Self {
        Self {
            api,
            session,
            navigator,
            state: RefCell::new(CatalogState::default()),
        }
    }

    /// Initial load: both collections fetched concurrently, all or nothing.
    pub async fn load(&self) {
        if !self.session.is_authenticated() {
            tracing::debug!("catalog opened without a session");
            self.navigator.navigate(Route::Login);
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            state.all_products = Resource::Loading;
            state.my_products = Resource::Loading;
        }

        let (all, mine) =
            futures::future::join(self.api.list_products(), self.api.my_products()).await;

        let failure = match (all, mine) {
            (Ok(all), Ok(mine)) => {
                tracing::info!("Loaded {} products, {} assigned", all.len(), mine.len());
                let mut state = self.state.borrow_mut();
                state.all_products = Resource::Ready(all);
                state.my_products = Resource::Ready(mine);
                return;
            }
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => e,
            // Prefer the error that demands a login
            (Err(a), Err(b)) => {
                if b.requires_login() && !a.requires_login() {
                    b
                } else {
                    a
                }
            }
        };

        {
            let mut state = self.state.borrow_mut();
            let reason = failure.to_string();
            state.all_products = Resource::Error(reason.clone());
            state.my_products = Resource::Error(reason);
            state.notifications.push(NoticeLevel::Error, LOAD_FAILED);
        }
        self.redirect_if_logged_out(&failure);
    }

    pub fn set_tab(&self, tab: Tab) {
        self.state.borrow_mut().tab = tab;
    }

    pub fn set_search(&self, term: &str) {
        self.state.borrow_mut().search = term.to_string();
    }

    pub fn set_category(&self, category: Option<&str>) {
        self.state.borrow_mut().category = category.map(str::to_string);
    }

    pub fn tab(&self) -> Tab {
        self.state.borrow().tab
    }

    pub fn phase(&self) -> CatalogPhase {
        let state = self.state.borrow();
        if state.all_products.is_loading() || state.my_products.is_loading() {
            return CatalogPhase::Loading;
        }
        if let Some(reason) = state.all_products.error().or(state.my_products.error()) {
            return CatalogPhase::Failed(reason.to_string());
        }
        if !state.all_products.is_ready() {
            return CatalogPhase::Idle;
        }
        if state.action.is_some() {
            CatalogPhase::Mutating
        } else {
            CatalogPhase::Ready
        }
    }

    pub fn all_products(&self) -> Vec<Product> {
        self.state.borrow().all_products.items().to_vec()
    }

    pub fn my_products(&self) -> Vec<Product> {
        self.state.borrow().my_products.items().to_vec()
    }

    /// Visible list for the active tab, search term and category.
    pub fn filtered(&self) -> Vec<Product> {
        let state = self.state.borrow();
        let source = match state.tab {
            Tab::All => state.all_products.items(),
            Tab::Mine => state.my_products.items(),
        };
        filter::filter_products(source, &state.search, state.category.as_deref())
    }

    /// Category options, always drawn from the full catalog.
    pub fn categories(&self) -> Vec<String> {
        filter::categories(self.state.borrow().all_products.items())
    }

    pub fn is_assigned(&self, id: ProductId) -> bool {
        self.state
            .borrow()
            .my_products
            .items()
            .iter()
            .any(|p| p.id == id)
    }

    pub fn action_in_flight(&self) -> Option<(MutationKind, ProductId)> {
        self.state.borrow().action
    }

    pub fn detail_state(&self) -> Resource<ProductDetail> {
        self.state.borrow().detail.clone()
    }

    pub fn detail(&self) -> Option<ProductDetail> {
        self.state.borrow().detail.ready().cloned()
    }

    /// Fetch one product for the detail view, falling back to the cached
    /// list entry when the fetch fails.
    pub async fn view_product(&self, id: ProductId) {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.detail_generation += 1;
            state.detail = Resource::Loading;
            state.detail_generation
        };
        let _pending = PendingDetail {
            state: &self.state,
            generation,
        };

        let result = self.api.get_product(id).await;

        let mut state = self.state.borrow_mut();
        if state.detail_generation != generation {
            tracing::debug!("Dropping detail response for product {}", id);
            return;
        }

        let err = match result {
            Ok(product) => {
                state.detail = Resource::Ready(ProductDetail {
                    product,
                    stale: false,
                });
                return;
            }
            Err(e) => e,
        };

        state.notifications.push(NoticeLevel::Error, DETAIL_FAILED);
        if err.requires_login() {
            state.detail = Resource::Idle;
            drop(state);
            self.redirect_if_logged_out(&err);
            return;
        }

        let cached = state
            .all_products
            .items()
            .iter()
            .find(|p| p.id == id)
            .cloned();
        match cached {
            Some(product) => {
                state.detail = Resource::Ready(ProductDetail {
                    product,
                    stale: true,
                });
                state.notifications.push(NoticeLevel::Warning, SHOWING_CACHED);
            }
            None => state.detail = Resource::Error(err.to_string()),
        }
    }

    /// Dismiss the detail view. A response still in flight is ignored.
    pub fn close_detail(&self) {
        let mut state = self.state.borrow_mut();
        state.detail_generation += 1;
        state.detail = Resource::Idle;
    }

    pub async fn assign(&self, id: ProductId) -> MutationOutcome {
        self.mutate(MutationKind::Assign, id).await
    }

    pub async fn unassign(&self, id: ProductId) -> MutationOutcome {
        self.mutate(MutationKind::Unassign, id).await
    }

    /// Assign when not assigned, otherwise unassign.
    pub async fn toggle_assignment(&self, id: ProductId) -> MutationOutcome {
        if self.is_assigned(id) {
            self.unassign(id).await
        } else {
            self.assign(id).await
        }
    }

    async fn mutate(&self, kind: MutationKind, id: ProductId) -> MutationOutcome {
        {
            let mut state = self.state.borrow_mut();
            if let Some((running, running_id)) = state.action {
                tracing::debug!(
                    "{:?} of {} blocked by {:?} of {}",
                    kind,
                    id,
                    running,
                    running_id
                );
                return MutationOutcome::Blocked;
            }
            state.action = Some((kind, id));
        }
        let slot = ActionSlot { state: &self.state };

        let result = match kind {
            MutationKind::Assign => self.api.assign_product(id).await,
            MutationKind::Unassign => self.api.unassign_product(id).await,
        };
        // Membership is re-read from the service, never patched locally
        let result = match result {
            Ok(_) => self.api.my_products().await,
            Err(e) => Err(e),
        };

        let (done_message, failed_message) = match kind {
            MutationKind::Assign => (ASSIGNED, ASSIGN_FAILED),
            MutationKind::Unassign => (UNASSIGNED, UNASSIGN_FAILED),
        };

        drop(slot);
        let mut state = self.state.borrow_mut();
        match result {
            Ok(mine) => {
                state.my_products = Resource::Ready(mine);
                state.notifications.push(NoticeLevel::Success, done_message);
                MutationOutcome::Done
            }
            Err(e) => {
                tracing::warn!("{:?} of {} failed: {}", kind, id, e);
                state.notifications.push(NoticeLevel::Error, failed_message);
                drop(state);
                self.redirect_if_logged_out(&e);
                MutationOutcome::Failed
            }
        }
    }

    /// Notices raised since the last call.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.state.borrow_mut().notifications.drain()
    }

    /// Explicit logout from the catalog screen.
    pub fn logout(&self) {
        self.session.clear_session();
        self.navigator.navigate(Route::Login);
    }

    fn redirect_if_logged_out(&self, err: &ApiError) {
        if err.requires_login() {
            self.navigator.navigate(Route::Login);
        }
    }
}

/// Clears the in-flight mutation when the mutating future finishes or is dropped.
struct ActionSlot<'a> {
    state: &'a RefCell<CatalogState>,
}

impl Drop for ActionSlot<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.action = None;
        }
    }
}

/// Resets a detail left in `Loading` by a dropped fetch of the same generation.
struct PendingDetail<'a> {
    state: &'a RefCell<CatalogState>,
    generation: u64,
}

impl Drop for PendingDetail<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if state.detail_generation == self.generation && state.detail.is_loading() {
                state.detail = Resource::Idle;
            }
        }
    }
}
