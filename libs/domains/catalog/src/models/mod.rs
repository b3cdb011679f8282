//! Documents, request payloads and response views

mod body;
mod category;
mod fields;
mod product;

pub use body::JsonFields;
pub use category::{
    Category, CategoryResponse, CategorySummary, CreateCategory, UpdateCategory, NAME_NOT_TEXT,
};
pub use fields::{Field, FieldErrors};
pub use product::{
    CategoryRef, CreateProduct, Product, ProductDraft, ProductResponse, UpdateProduct,
    CATEGORY_INVALID, CATEGORY_MISSING, CATEGORY_REQUIRED, DESCRIPTION_NOT_TEXT, DESCRIPTION_REQUIRED,
    PRICE_NOT_NUMBER, PRICE_REQUIRED, PRICE_TOO_LOW, TITLE_NOT_TEXT, TITLE_REQUIRED,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation body for updates, deletes and empty searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Category updated.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
