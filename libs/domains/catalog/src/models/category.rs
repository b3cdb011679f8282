use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use super::{Field, FieldErrors, JsonFields};

pub const NAME_NOT_TEXT: &str = "Category name must be a string.";

/// Category document as stored in the `categories` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// New category with a fresh id and both timestamps set to now.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `update` and bump `updated_at`.
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

/// Payload for creating a category
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(
        required(message = "Category name is required."),
        length(min = 1, message = "Category name is required.")
    )]
    #[schema(example = "Tools")]
    pub name: Option<String>,
}

impl CreateCategory {
    /// Read a request body; a wrong type is reported with every other
    /// failing field.
    pub fn from_json(body: Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = JsonFields::new(body);
        let input = Self {
            name: fields.text(Field::Name, NAME_NOT_TEXT),
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

    /// Validate and build the document to insert.
    pub fn into_category(self) -> Result<Category, FieldErrors> {
        self.validate()
            .map_err(|e| FieldErrors::from_validation(&e))?;
        let name = self
            .name
            .ok_or_else(|| FieldErrors::single(Field::Name, "Category name is required."))?;
        Ok(Category::new(name))
    }
}

/// Partial update for a category; absent fields are left untouched
#[derive(Debug, Clone, Default, ToSchema)]
pub struct UpdateCategory {
    #[schema(example = "Garden")]
    pub name: Option<String>,
}

impl UpdateCategory {
    pub fn from_json(body: Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = JsonFields::new(body);
        let name = fields.text(Field::Name, NAME_NOT_TEXT);

        let errors = fields.into_errors();
        if errors.is_empty() {
            Ok(Self { name })
        } else {
            Err(errors)
        }
    }
}

/// Category as rendered to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// 24-character hex identifier
    #[schema(example = "65f1c0ffee0ddba11ade1e55")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        category.clone().into()
    }
}

/// `{id, name}` view used when a product's category is resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name.clone(),
        }
    }
}
