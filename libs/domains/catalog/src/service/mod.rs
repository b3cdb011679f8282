//! Catalog services - business logic layer
//!
//! Services validate identifiers before touching the store, enforce the
//! category/product reference rules and shape the response views.

mod category;
mod product;

pub use category::CategoryService;
pub use product::{FilterOutcome, ProductService};

pub const CATEGORY_UPDATED: &str = "Category updated.";
pub const CATEGORY_DELETED: &str = "Category deleted.";
pub const PRODUCT_UPDATED: &str = "Product updated.";
pub const PRODUCT_DELETED: &str = "Product deleted.";
pub const NO_PRODUCTS_FOUND: &str = "No products found with this parameter.";
