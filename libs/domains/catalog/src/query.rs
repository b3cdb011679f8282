//! Product search built from raw query-string parameters.

use std::collections::HashMap;

use crate::error::{CatalogError, CatalogResult};

/// A validated product search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    /// Substring of a product title
    Title(String),
    /// Substring of a category name
    CategoryName(String),
}

impl ProductQuery {
    /// Pick the search from `params`; `title` takes precedence over `category`.
    pub fn from_params(params: &HashMap<String, String>) -> CatalogResult<Self> {
        if params.is_empty() {
            return Err(CatalogError::MissingParameter);
        }

        let (term, build): (&String, fn(String) -> Self) = if let Some(term) = params.get("title")
        {
            (term, Self::Title)
        } else if let Some(term) = params.get("category") {
            (term, Self::CategoryName)
        } else {
            return Err(CatalogError::UnrecognizedParameter);
        };

        if term.is_empty() {
            return Err(CatalogError::MissingParameterValue);
        }
        Ok(build(term.clone()))
    }

    pub fn term(&self) -> &str {
        match self {
            Self::Title(term) | Self::CategoryName(term) => term,
        }
    }

    /// Regex source matching the term literally; pair with the `i` option.
    pub fn pattern(&self) -> String {
        regex::escape(self.term())
    }
}
