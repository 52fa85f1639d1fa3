//! Navigation capability handed to the orchestration layer.
//!
//! The HTTP client never redirects. When a call comes back as
//! [`api::ApiError::SessionExpired`] the controller or the auth flow asks its
//! [`Navigator`] to go to [`Route::Login`]; the presentation layer decides what
//! that means (a page load, a printed hint, ...).

use std::cell::RefCell;
use std::fmt;

use store::ProductId;

/// Screens the client can send the user to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Catalog,
    Product(ProductId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/login"),
            Route::Catalog => write!(f, "/dashboard"),
            Route::Product(id) => write!(f, "/dashboard/{id}"),
        }
    }
}

pub trait Navigator {
    fn navigate(&self, route: Route);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

/// Navigator that only remembers where it was asked to go.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.borrow().last().copied()
    }

    pub fn count(&self, route: Route) -> usize {
        self.routes.borrow().iter().filter(|r| **r == route).count()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("navigate to {}", route);
        self.routes.borrow_mut().push(route);
    }
}
