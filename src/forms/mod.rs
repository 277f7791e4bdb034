//! Form definitions backing the POS routes.
//!
//! Numeric inputs are received as strings so that an empty or malformed field
//! produces a readable message instead of a rejected request.

use thiserror::Error;
use validator::ValidationErrors;

pub mod cart;
pub mod employees;
pub mod inventory;
pub mod preferences;
pub mod products;
pub mod reports;

#[derive(Debug, Error, PartialEq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unknown product")]
    InvalidProductId,

    #[error("Unknown ingredient")]
    InvalidIngredientId,

    #[error("This item is no longer in the cart")]
    InvalidLineId,

    #[error("Unknown order")]
    InvalidOrderId,

    #[error("Quantity must be a whole number")]
    InvalidLineQuantity,

    #[error("Please select an employee.")]
    InvalidEmployeeId,

    #[error("Please enter both name and role.")]
    MissingNameOrRole,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("Ingredient name cannot be empty.")]
    InvalidIngredientName,

    #[error("Enter valid non-negative quantity.")]
    InvalidStockQuantity,

    #[error("Enter valid non-negative price per unit.")]
    InvalidUnitPrice,

    #[error("Enter a valid positive number.")]
    InvalidPositiveNumber,

    #[error("Product name required")]
    InvalidProductName,

    #[error("Enter a valid price")]
    InvalidPrice,

    #[error("Add at least one ingredient")]
    EmptyRecipe,

    #[error("Complete all ingredient fields")]
    IncompleteRecipe,

    #[error("Enter a valid date.")]
    InvalidDate,

    #[error("Start date must be before or equal to end date.")]
    InvalidDateRange,
}

/// Parses a trimmed decimal input; empty and non-finite values are rejected.
pub(crate) fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a positive integer identifier from a form field.
pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|v| *v > 0)
}
