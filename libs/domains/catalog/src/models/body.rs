use serde_json::{Map, Value};

use super::{Field, FieldErrors};

/// A decoded request body read field by field.
///
/// Values are coerced the way a loosely typed client expects: numbers and
/// booleans are accepted where text is wanted, and numeric strings where a
/// number is wanted. `null` reads as absent. Anything else is recorded as a
/// field error, so a wrong type is reported like any other invalid field.
pub struct JsonFields {
    map: Map<String, Value>,
    errors: FieldErrors,
}

impl JsonFields {
    pub fn new(map: Map<String, Value>) -> Self {
        Self {
            map,
            errors: FieldErrors::new(),
        }
    }

    pub fn text(&mut self, field: Field, wrong_type: &str) -> Option<String> {
        match self.map.remove(field.as_ref())? {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(_) | Value::Object(_) => {
                self.errors.insert(field, wrong_type);
                None
            }
        }
    }

    pub fn number(&mut self, field: Field, wrong_type: &str) -> Option<f64> {
        let parsed = match self.map.remove(field.as_ref())? {
            Value::Null => return None,
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() => return None,
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed.filter(|n| n.is_finite()) {
            Some(n) => Some(n),
            None => {
                self.errors.insert(field, wrong_type);
                None
            }
        }
    }

    /// Type errors recorded so far.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}
