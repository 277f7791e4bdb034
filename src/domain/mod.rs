//! Domain records of the point-of-sale screens and the cart model.

pub mod cart;
pub mod employee;
pub mod inventory;
pub mod order;
pub mod preferences;
pub mod product;
pub mod report;
pub mod types;
pub mod weather;
