//! In-memory service fake shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use api::{ApiError, ApiMessage, NewUser, Product, ProductId, TokenResponse, User};
use store::{MemoryStore, SessionProvider, SessionStore};

use crate::service::{AuthApi, CatalogApi};

pub fn product(id: i64, name: &str, category: &str) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        data_category: category.to_string(),
        record_count: (id as u64) * 1000,
        fields: vec!["Company name".to_string(), "Website".to_string()],
        description: Some(format!("{name} dataset")),
    }
}

/// How a fake endpoint should fail.
#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Server,
    Expired,
}

impl Failure {
    fn error(self) -> ApiError {
        match self {
            Failure::Server => ApiError::RequestFailed {
                status: 500,
                message: "boom".to_string(),
            },
            Failure::Expired => ApiError::SessionExpired,
        }
    }
}

/// Catalog service held in memory. Every call yields once before answering,
/// so futures joined on one task interleave the way UI events do.
///
/// Like the real client, an expired-session failure clears the session
/// attached with [`FakeApi::attach_session`].
#[derive(Default)]
pub struct FakeApi {
    pub products: RefCell<Vec<Product>>,
    pub assigned: RefCell<Vec<ProductId>>,
    pub failures: RefCell<HashMap<&'static str, Failure>>,
    pub calls: RefCell<Vec<String>>,
    pub in_flight: Cell<usize>,
    pub max_in_flight: Cell<usize>,
    pub session: RefCell<Option<SessionStore<MemoryStore>>>,
}

impl FakeApi {
    pub fn with_catalog(products: Vec<Product>, assigned: &[i64]) -> Self {
        let fake = Self::default();
        *fake.products.borrow_mut() = products;
        *fake.assigned.borrow_mut() = assigned.iter().copied().map(ProductId).collect();
        fake
    }

    pub fn fail(&self, endpoint: &'static str, failure: Failure) {
        self.failures.borrow_mut().insert(endpoint, failure);
    }

    pub fn attach_session(&self, sessions: &SessionStore<MemoryStore>) {
        *self.session.borrow_mut() = Some(sessions.clone());
    }

    pub fn heal(&self, endpoint: &'static str) {
        self.failures.borrow_mut().remove(endpoint);
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == endpoint).count()
    }

    async fn enter(&self, endpoint: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(endpoint.to_string());
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));
        tokio::task::yield_now().await;
        self.in_flight.set(self.in_flight.get() - 1);
        let failure = self.failures.borrow().get(endpoint).copied();
        match failure {
            Some(Failure::Expired) => {
                if let Some(sessions) = self.session.borrow().as_ref() {
                    sessions.clear_session();
                }
                Err(Failure::Expired.error())
            }
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }

    fn mine(&self) -> Vec<Product> {
        let assigned = self.assigned.borrow();
        self.products
            .borrow()
            .iter()
            .filter(|p| assigned.contains(&p.id))
            .cloned()
            .collect()
    }
}

impl CatalogApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.enter("products").await?;
        Ok(self.products.borrow().clone())
    }

    async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        self.enter("my-products").await?;
        Ok(self.mine())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.enter("product").await?;
        self.products
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::RequestFailed {
                status: 404,
                message: "Product not found".to_string(),
            })
    }

    async fn assign_product(&self, id: ProductId) -> Result<ApiMessage, ApiError> {
        self.enter("assign").await?;
        let mut assigned = self.assigned.borrow_mut();
        if !assigned.contains(&id) {
            assigned.push(id);
        }
        Ok(ApiMessage {
            message: format!("Product {id} assigned to user successfully"),
        })
    }

    async fn unassign_product(&self, id: ProductId) -> Result<ApiMessage, ApiError> {
        self.enter("unassign").await?;
        self.assigned.borrow_mut().retain(|a| *a != id);
        Ok(ApiMessage {
            message: format!("Product {id} unassigned from user successfully"),
        })
    }
}

impl AuthApi for FakeApi {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.enter("token").await?;
        if password == "correct" {
            Ok(TokenResponse {
                access_token: format!("{username}-token"),
                token_type: "bearer".to_string(),
            })
        } else {
            Err(ApiError::RequestFailed {
                status: 401,
                message: "Incorrect username or password".to_string(),
            })
        }
    }

    async fn register(&self, new_user: &NewUser) -> Result<User, ApiError> {
        self.enter("register").await?;
        if new_user.username == "alice" {
            return Err(ApiError::RequestFailed {
                status: 400,
                message: "Username already registered".to_string(),
            });
        }
        Ok(User {
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            full_name: new_user.full_name.clone(),
            disabled: Some(false),
        })
    }

    async fn current_user_with_token(&self, token: &str) -> Result<User, ApiError> {
        self.enter("users/me").await?;
        match token.strip_suffix("-token") {
            Some(username) if !username.is_empty() => Ok(User {
                username: username.to_string(),
                email: Some(format!("{username}@example.com")),
                full_name: None,
                disabled: Some(false),
            }),
            _ => Err(ApiError::RequestFailed {
                status: 401,
                message: "Could not validate credentials".to_string(),
            }),
        }
    }
}
