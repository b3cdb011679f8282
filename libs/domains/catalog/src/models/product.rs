use std::borrow::Cow;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{CategoryResponse, CategorySummary, Field, FieldErrors, JsonFields};
use crate::ids::is_object_id;
use crate::models::Category;

pub const TITLE_REQUIRED: &str = "Product title is required.";
pub const DESCRIPTION_REQUIRED: &str = "Product description is required.";
pub const PRICE_REQUIRED: &str = "Product price is required.";
pub const PRICE_TOO_LOW: &str = "Product price must be at least 1.";
pub const CATEGORY_REQUIRED: &str = "Product category is required.";
pub const CATEGORY_INVALID: &str = "Product category must be a valid identifier.";
pub const CATEGORY_MISSING: &str = "Product category does not exist.";
pub const TITLE_NOT_TEXT: &str = "Product title must be a string.";
pub const DESCRIPTION_NOT_TEXT: &str = "Product description must be a string.";
pub const PRICE_NOT_NUMBER: &str = "Product price must be a number.";

fn validate_category_id(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(CATEGORY_REQUIRED)));
    }
    if !is_object_id(raw) {
        return Err(ValidationError::new("object_id").with_message(Cow::Borrowed(CATEGORY_INVALID)));
    }
    Ok(())
}

/// Product document as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Id of the owning category
    pub category: ObjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: ObjectId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title: title.into(),
            description: description.into(),
            price,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `update` and bump `updated_at`.
    ///
    /// `category` must already be parsed; see [`UpdateProduct::category_id`].
    pub fn apply_update(&mut self, update: UpdateProduct, category: Option<ObjectId>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = category {
            self.category = category;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload for creating a product
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        required(message = "Product title is required."),
        length(min = 1, message = "Product title is required.")
    )]
    #[schema(example = "Hammer")]
    pub title: Option<String>,

    #[validate(
        required(message = "Product description is required."),
        length(min = 1, message = "Product description is required.")
    )]
    #[schema(example = "Steel claw hammer")]
    pub description: Option<String>,

    #[validate(
        required(message = "Product price is required."),
        range(min = 1.0, message = "Product price must be at least 1.")
    )]
    #[schema(example = 10.0, minimum = 1.0)]
    pub price: Option<f64>,

    /// Id of an existing category
    #[validate(
        required(message = "Product category is required."),
        custom(function = "validate_category_id")
    )]
    #[schema(example = "65f1c0ffee0ddba11ade1e55")]
    pub category: Option<String>,
}

/// A create payload that passed field validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: ObjectId,
}

impl ProductDraft {
    pub fn into_product(self) -> Product {
        Product::new(self.title, self.description, self.price, self.category)
    }
}

impl CreateProduct {
    /// Read a request body; wrong types are reported with every other
    /// failing field.
    pub fn from_json(body: Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = JsonFields::new(body);
        let input = Self {
            title: fields.text(Field::Title, TITLE_NOT_TEXT),
            description: fields.text(Field::Description, DESCRIPTION_NOT_TEXT),
            price: fields.number(Field::Price, PRICE_NOT_NUMBER),
            category: fields.text(Field::Category, CATEGORY_INVALID),
        };

        let mut errors = fields.into_errors();
        if errors.is_empty() {
            return Ok(input);
        }
        if let Err(e) = input.validate() {
            errors.merge(FieldErrors::from_validation(&e));
        }
        Err(errors)
    }

    /// Check every field and collect one message per failing field.
    ///
    /// Whether the category exists is the service's concern.
    pub fn into_draft(self) -> Result<ProductDraft, FieldErrors> {
        self.validate()
            .map_err(|e| FieldErrors::from_validation(&e))?;

        let title = self
            .title
            .ok_or_else(|| FieldErrors::single(Field::Title, TITLE_REQUIRED))?;
        let description = self
            .description
            .ok_or_else(|| FieldErrors::single(Field::Description, DESCRIPTION_REQUIRED))?;
        let price = self
            .price
            .ok_or_else(|| FieldErrors::single(Field::Price, PRICE_REQUIRED))?;
        let category = self
            .category
            .as_deref()
            .and_then(|raw| ObjectId::parse_str(raw).ok())
            .ok_or_else(|| FieldErrors::single(Field::Category, CATEGORY_INVALID))?;

        Ok(ProductDraft {
            title,
            description,
            price,
            category,
        })
    }
}

/// Partial update for a product; absent fields are left untouched
///
/// Only a changed category reference is checked.
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Id of an existing category
    #[validate(custom(function = "validate_category_id"))]
    pub category: Option<String>,
}

impl UpdateProduct {
    /// Read a request body; only values of the wrong type are refused.
    pub fn from_json(body: Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = JsonFields::new(body);
        let update = Self {
            title: fields.text(Field::Title, TITLE_NOT_TEXT),
            description: fields.text(Field::Description, DESCRIPTION_NOT_TEXT),
            price: fields.number(Field::Price, PRICE_NOT_NUMBER),
            category: fields.text(Field::Category, CATEGORY_INVALID),
        };

        let errors = fields.into_errors();
        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }

    /// The new category reference, if the update carries one.
    pub fn category_id(&self) -> Result<Option<ObjectId>, FieldErrors> {
        self.validate()
            .map_err(|e| FieldErrors::from_validation(&e))?;
        self.category
            .as_deref()
            .map(ObjectId::parse_str)
            .transpose()
            .map_err(|_| FieldErrors::single(Field::Category, CATEGORY_INVALID))
    }
}

/// How a product's `category` is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Bare hex id (title search)
    Id(String),
    /// Full category (category search)
    Embedded(CategoryResponse),
    /// `{id, name}` (list and get)
    Summary(CategorySummary),
}

/// Product as rendered to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// 24-character hex identifier
    #[schema(example = "65f1c0ffee0ddba11ade1e56")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// `null` when the referenced category no longer exists
    pub category: Option<CategoryRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    fn with_category(product: Product, category: Option<CategoryRef>) -> Self {
        Self {
            id: product.id.to_hex(),
            title: product.title,
            description: product.description,
            price: product.price,
            category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }

    /// Category left as its hex id.
    pub fn unresolved(product: Product) -> Self {
        let category = CategoryRef::Id(product.category.to_hex());
        Self::with_category(product, Some(category))
    }

    /// Category resolved to `{id, name}`.
    pub fn resolved(product: Product, category: Option<&Category>) -> Self {
        let category = category.map(|c| CategoryRef::Summary(c.into()));
        Self::with_category(product, category)
    }

    /// Category resolved to the whole record.
    pub fn embedded(product: Product, category: Option<&Category>) -> Self {
        let category = category.map(|c| CategoryRef::Embedded(c.into()));
        Self::with_category(product, category)
    }
}
