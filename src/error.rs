//! Errors raised while setting up or diffing reactive lists.

use thiserror::Error;

/// Why a list could not be set up or diffed.
///
/// Every variant is a caller mistake; none of them is worth retrying.
#[derive(Debug, Error)]
pub enum ForError {
    /// `map` was combined with `item_id_key` or `mutable_map`.
    #[error("if `map` is provided, `item_id_key` and `mutable_map` are unnecessary")]
    ConflictingMaps,

    /// Neither `map` nor `mutable_map` was given.
    #[error("`mutable_map` is missing")]
    MissingMutableMap,

    /// `mutable_map` was used with items that have no named fields.
    #[error("item at index {index} is not a record; `mutable_map` needs items with named fields")]
    NonRecordItem { index: usize },

    /// A keyed list contains an item without the key field.
    #[error("invalid input: item at index {index} has no `{key}` field")]
    MissingIdentityKey { key: String, index: usize },

    /// Two items of a keyed list share the same identity.
    #[error("invalid input: identity {identity} appears more than once for key `{key}`")]
    DuplicateIdentity { key: String, identity: String },

    /// The item could not be turned into a fingerprint.
    #[error("invalid input: item could not be serialized: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

impl ForError {
    /// Options that contradict each other or are missing.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConflictingMaps | Self::MissingMutableMap | Self::NonRecordItem { .. }
        )
    }

    /// Items that cannot be diffed.
    pub fn is_invalid_input(&self) -> bool {
        !self.is_configuration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ForError::ConflictingMaps.is_configuration());
        assert!(ForError::MissingMutableMap.is_configuration());
        assert!(ForError::NonRecordItem { index: 0 }.is_configuration());
        assert!(!ForError::NonRecordItem { index: 0 }.is_invalid_input());

        let missing = ForError::MissingIdentityKey { key: "id".into(), index: 2 };
        assert!(missing.is_invalid_input());
        assert!(!missing.is_configuration());

        let duplicate = ForError::DuplicateIdentity { key: "id".into(), identity: "1".into() };
        assert!(duplicate.is_invalid_input());
    }
}
