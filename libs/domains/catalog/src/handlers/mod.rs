//! HTTP handlers, one router per resource
//!
//! Each router is meant to be nested under its resource path
//! (`/category`, `/product`, `/populate`).

pub mod categories;
pub mod populate;
pub mod products;

pub use categories::CategoryApiDoc;
pub use populate::{PopulateApiDoc, PopulateResponse};
pub use products::{FilterResponse, ProductApiDoc};
