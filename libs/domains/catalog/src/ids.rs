//! Identifier checks shared by every by-id operation.

use mongodb::bson::oid::ObjectId;

use crate::error::{CatalogError, CatalogResult, Entity};

/// `true` for exactly 24 ASCII hex digits, either case.
pub fn is_object_id(raw: &str) -> bool {
    raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a client-supplied id for `entity`.
///
/// Empty input is [`CatalogError::MissingId`]; anything that is not 24 hex
/// digits is [`CatalogError::InvalidId`]. Nothing here touches the store.
pub fn parse_id(raw: &str, entity: Entity) -> CatalogResult<ObjectId> {
    if raw.is_empty() {
        return Err(CatalogError::MissingId);
    }
    if !is_object_id(raw) {
        return Err(CatalogError::InvalidId(entity));
    }
    ObjectId::parse_str(raw).map_err(|_| CatalogError::InvalidId(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_24_hex_digits_in_any_case() {
        assert!(is_object_id("507f1f77bcf86cd799439011"));
        assert!(is_object_id("507F1F77BCF86CD799439011"));
    }

    #[test]
    fn test_rejects_wrong_length_or_alphabet() {
        assert!(!is_object_id(""));
        assert!(!is_object_id("507f1f77bcf86cd79943901"));
        assert!(!is_object_id("507f1f77bcf86cd7994390111"));
        assert!(!is_object_id("507f1f77bcf86cd79943901z"));
        assert!(!is_object_id("not-an-id"));
    }

    #[test]
    fn test_parse_id_errors() {
        assert!(matches!(
            parse_id("", Entity::Category),
            Err(CatalogError::MissingId)
        ));
        assert!(matches!(
            parse_id("abc", Entity::Product),
            Err(CatalogError::InvalidId(Entity::Product))
        ));
    }

    #[test]
    fn test_parse_id_round_trips_hex() {
        let id = ObjectId::new();
        assert_eq!(parse_id(&id.to_hex(), Entity::Category).unwrap(), id);
        assert_eq!(
            parse_id(&id.to_hex().to_uppercase(), Entity::Category).unwrap(),
            id
        );
    }
}
