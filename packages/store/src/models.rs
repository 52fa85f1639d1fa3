//! # Domain models for users and catalog products
//!
//! Defines the data structures exchanged with the catalog service and kept in
//! client-side state. All types are `Serialize + Deserialize` and use the exact
//! field names of the wire format, so they can be decoded straight from a
//! response body or re-encoded into the persisted session record.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The authenticated user's profile as returned by `/users/me`. Read-only on the client. |
//! | [`Product`] | A dataset offering in the catalog. `dataCategory` and `recordCount` keep their camelCase wire names. |
//! | [`ProductId`] | Server-assigned integer identity of a product. |
//! | [`NewUser`] | Registration payload for `/register`. |
//! | [`TokenResponse`] | Bearer token issued by `/token`. |
//! | [`ApiMessage`] | Acknowledgement body returned by assign/unassign. |
//! | [`ErrorBody`] | `{"detail": "..."}` error body produced by the service. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User profile as reported by the catalog service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl User {
    /// A user with only a username, as created by tests and fixtures.
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            full_name: None,
            disabled: None,
        }
    }

    /// Get display name, falling back to the username if no full name is set.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Server-assigned product identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

/// A dataset offering in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-form category label: "Financial", "Contact", ...
    #[serde(rename = "dataCategory")]
    pub data_category: String,
    #[serde(rename = "recordCount")]
    pub record_count: u64,
    /// Ordered field names exposed by the dataset.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Registration payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub password: String,
}

/// Bearer token issued in exchange for credentials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Plain acknowledgement returned by mutation endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// Error body produced by the service on non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
