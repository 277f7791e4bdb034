//! DTO modules that bridge services with templates.

pub mod cart;
pub mod cashier;
pub mod catalog;
pub mod customer;
pub mod main;
pub mod manager;
pub mod menu_board;
