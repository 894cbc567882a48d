//! # Request Handlers
//!
//! One module per resource, mirroring the route tree:
//!
//! - [`category`] - `/api/category` CRUD
//! - [`product`] - `/api/product` CRUD with category snapshots
//! - [`transaction`] - `/api/checkout` and the sales summary

pub mod category;
pub mod product;
pub mod transaction;
