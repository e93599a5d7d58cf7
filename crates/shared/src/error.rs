use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNREACHABLE_MESSAGE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";
pub const CATALOG_UNREACHABLE_MESSAGE: &str =
    "Could not fetch products. Check that the backend is running, reachable and returns valid JSON.";

/// Failure body returned by the backend, e.g. `{"success": false, "message": "..."}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartFetchErrorKind {
    Unauthorized,
    BadRequest,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct CartFetchError {
    pub kind: CartFetchErrorKind,
    pub message: String,
}

impl CartFetchError {
    pub fn new(kind: CartFetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unreachable() -> Self {
        Self::new(CartFetchErrorKind::Unreachable, UNREACHABLE_MESSAGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartMutationErrorKind {
    ProductNotFound,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct CartMutationError {
    pub kind: CartMutationErrorKind,
    pub message: String,
}

impl CartMutationError {
    pub fn new(kind: CartMutationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unreachable() -> Self {
        Self::new(CartMutationErrorKind::Unreachable, UNREACHABLE_MESSAGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotAuthenticated,
    DuplicateItem,
    InvalidQuantity,
}

impl RejectReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "Login to add an item to the Cart",
            Self::DuplicateItem => {
                "Item already in cart. Use the cart sidebar to update quantity or remove item."
            }
            Self::InvalidQuantity => "Quantity must be at least 1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart update rejected: {reason:?}")]
pub struct Rejected {
    pub reason: RejectReason,
}

impl From<RejectReason> for Rejected {
    fn from(reason: RejectReason) -> Self {
        Self { reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogErrorKind {
    ServerError,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unreachable() -> Self {
        Self::new(CatalogErrorKind::Unreachable, CATALOG_UNREACHABLE_MESSAGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    /// The backend refused the credentials or the registration (HTTP 400).
    Rejected,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unreachable() -> Self {
        Self::new(
            AuthErrorKind::Unreachable,
            "Something went wrong. Check that the backend is running, reachable and returns valid JSON.",
        )
    }
}
