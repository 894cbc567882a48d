//! # Repository Module
//!
//! One repository per aggregate:
//!
//! - [`category`] - category master data (plain single-table CRUD)
//! - [`product`] - product master data plus the transactional
//!   lock/decrement variants the checkout engine uses
//! - [`transaction`] - append-only sale records with line items

pub mod category;
pub mod product;
pub mod transaction;
