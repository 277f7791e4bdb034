//! Screen operations. Each function is generic over the backend traits it
//! needs so that tests can run against `MockBackend`.

use thiserror::Error;

use crate::backend::errors::BackendError;
use crate::domain::cart::CartError;
use crate::forms::FormError;

pub mod access;
pub mod cart;
pub mod cashier;
pub mod customer;
pub mod employees;
pub mod inventory;
pub mod main;
pub mod menu_board;
pub mod products;
pub mod reports;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Message meant to be shown to the user as is.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Banner text for a failed action.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "You do not have access to this screen.".to_string(),
            ServiceError::NotFound => "The requested item no longer exists.".to_string(),
            ServiceError::Form(message) => message.clone(),
            ServiceError::TypeConstraint(_) => "Invalid input.".to_string(),
            ServiceError::Backend(err) => err.user_message(),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<CartError> for ServiceError {
    fn from(err: CartError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
