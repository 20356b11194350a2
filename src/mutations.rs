//! Mutation detection - What happened to each position of a list.
//!
//! Given the previous and the current snapshot of a list, [`detect_mutations`]
//! produces one [`Mutation`] per item of the *current* list, in order:
//!
//! ```text
//! old: [a, b, c]        new: [c, a', d]        key: "id"
//!
//! 0: c  → Shuffle  { old_index: 2 }
//! 1: a' → Update   { old_index: 0 }   (same id, other fields changed)
//! 2: d  → Add
//!        b is never mentioned → implicitly removed
//! ```
//!
//! # Identity
//!
//! With an identity key, the value of that field identifies an item no matter
//! where it sits or what its other fields hold. Without a key the whole value
//! is the identity, so editing any field looks exactly like removing the item
//! and adding a new one.
//!
//! Identities are JSON fingerprints (via `serde_json`), so any `Serialize`
//! type works and `1` and `"1"` stay distinct.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ForError;

/// The five things that can happen to a list position.
///
/// `Remove` never appears in [`detect_mutations`] output; it is reported by
/// [`removed_indices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Add,
    Remove,
    Update,
    Shuffle,
    None,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::Shuffle => "shuffle",
            Self::None => "none",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition of one position of the new list.
///
/// `index` is the position in the new list, `old_index` the position the same
/// item had in the old one.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    /// Item did not exist before.
    Add { index: usize, value: T },
    /// Same identity, different value (keyed lists only).
    Update { old_index: usize, index: usize, value: T },
    /// Same value, different position.
    Shuffle { old_index: usize, index: usize, value: T },
    /// Same value, same position.
    None { index: usize, value: T },
}

impl<T> Mutation<T> {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Add { .. } => MutationKind::Add,
            Self::Update { .. } => MutationKind::Update,
            Self::Shuffle { .. } => MutationKind::Shuffle,
            Self::None { .. } => MutationKind::None,
        }
    }

    /// Position in the new list.
    pub fn index(&self) -> usize {
        match self {
            Self::Add { index, .. }
            | Self::Update { index, .. }
            | Self::Shuffle { index, .. }
            | Self::None { index, .. } => *index,
        }
    }

    /// Position in the old list. `None` for [`Mutation::Add`].
    pub fn old_index(&self) -> Option<usize> {
        match self {
            Self::Add { .. } => None,
            Self::Update { old_index, .. } | Self::Shuffle { old_index, .. } => Some(*old_index),
            Self::None { index, .. } => Some(*index),
        }
    }

    /// The item as it is in the new list.
    pub fn value(&self) -> &T {
        match self {
            Self::Add { value, .. }
            | Self::Update { value, .. }
            | Self::Shuffle { value, .. }
            | Self::None { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Add { value, .. }
            | Self::Update { value, .. }
            | Self::Shuffle { value, .. }
            | Self::None { value, .. } => value,
        }
    }
}

// =============================================================================
// Identity
// =============================================================================

/// Fingerprint identifying `item` at `index`.
///
/// Keyed: the JSON of the key field (the item must be a record holding it).
/// Unkeyed: the JSON of the whole item.
pub(crate) fn identity_of<T: Serialize>(
    item: &T,
    index: usize,
    item_id_key: Option<&str>,
) -> Result<String, ForError> {
    let value = serde_json::to_value(item)?;
    let Some(key) = item_id_key else {
        return Ok(value.to_string());
    };

    let Value::Object(fields) = value else {
        return Err(ForError::NonRecordItem { index });
    };
    fields
        .get(key)
        .map(Value::to_string)
        .ok_or_else(|| ForError::MissingIdentityKey {
            key: key.to_string(),
            index,
        })
}

/// Whether `item` serializes to a record (a JSON object).
pub(crate) fn is_record<T: Serialize>(item: &T) -> Result<bool, ForError> {
    Ok(serde_json::to_value(item)?.is_object())
}

/// Old positions per identity.
///
/// Keyed lists must have unique identities. Unkeyed lists may repeat a value;
/// the positions queue up and are handed out in order.
fn index_identities<T: Serialize>(
    items: &[T],
    item_id_key: Option<&str>,
) -> Result<HashMap<String, VecDeque<usize>>, ForError> {
    let mut positions: HashMap<String, VecDeque<usize>> = HashMap::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let identity = identity_of(item, index, item_id_key)?;
        match positions.entry(identity) {
            Entry::Vacant(entry) => {
                entry.insert(VecDeque::from([index]));
            }
            Entry::Occupied(entry) => match item_id_key {
                Some(key) => {
                    return Err(ForError::DuplicateIdentity {
                        key: key.to_string(),
                        identity: entry.key().clone(),
                    });
                }
                None => entry.into_mut().push_back(index),
            },
        }
    }

    Ok(positions)
}

/// Reject keyed lists whose identities are not unique.
pub(crate) fn ensure_unique_identities<T: Serialize>(
    items: &[T],
    item_id_key: Option<&str>,
) -> Result<(), ForError> {
    if item_id_key.is_some() {
        index_identities(items, item_id_key)?;
    }
    Ok(())
}

// =============================================================================
// Detection
// =============================================================================

/// Describe how `old_items` became `new_items`.
///
/// Returns one mutation per item of `new_items`, in the same order. Pure and
/// deterministic.
///
/// # Errors
///
/// With an `item_id_key`: [`ForError::NonRecordItem`] for items that are not
/// records, [`ForError::MissingIdentityKey`] for records without the key and
/// [`ForError::DuplicateIdentity`] when either list repeats an identity.
///
/// # Example
///
/// ```ignore
/// let old = vec![json!({"id": 1, "text": "a"})];
/// let new = vec![json!({"id": 1, "text": "b"})];
///
/// let mutations = detect_mutations(&old, &new, Some("id"))?;
/// assert_eq!(mutations[0].kind(), MutationKind::Update);
/// ```
pub fn detect_mutations<T>(
    old_items: &[T],
    new_items: &[T],
    item_id_key: Option<&str>,
) -> Result<Vec<Mutation<T>>, ForError>
where
    T: Clone + PartialEq + Serialize,
{
    let mut old_positions = index_identities(old_items, item_id_key)?;
    let mut seen = HashSet::new();
    let mut mutations = Vec::with_capacity(new_items.len());

    for (index, item) in new_items.iter().enumerate() {
        let identity = identity_of(item, index, item_id_key)?;

        if let Some(key) = item_id_key {
            if !seen.insert(identity.clone()) {
                return Err(ForError::DuplicateIdentity {
                    key: key.to_string(),
                    identity,
                });
            }
        }

        let old_index = old_positions
            .get_mut(&identity)
            .and_then(VecDeque::pop_front);
        let value = item.clone();

        let mutation = match old_index {
            None => Mutation::Add { index, value },
            Some(old_index) if item_id_key.is_some() && old_items[old_index] != *item => {
                Mutation::Update { old_index, index, value }
            }
            Some(old_index) if old_index != index => Mutation::Shuffle { old_index, index, value },
            Some(_) => Mutation::None { index, value },
        };
        mutations.push(mutation);
    }

    Ok(mutations)
}

/// Old positions that no mutation refers to, in ascending order.
pub fn removed_indices<T>(old_len: usize, mutations: &[Mutation<T>]) -> Vec<usize> {
    let mut survived = vec![false; old_len];
    for old_index in mutations.iter().filter_map(Mutation::old_index) {
        if let Some(flag) = survived.get_mut(old_index) {
            *flag = true;
        }
    }

    survived
        .iter()
        .enumerate()
        .filter(|(_, survived)| !**survived)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kinds<T>(mutations: &[Mutation<T>]) -> Vec<MutationKind> {
        mutations.iter().map(Mutation::kind).collect()
    }

    #[test]
    fn test_keyed_value_change_is_update() {
        let old = vec![json!({"id": 1, "text": "a"})];
        let new = vec![json!({"id": 1, "text": "b"})];

        let mutations = detect_mutations(&old, &new, Some("id")).unwrap();

        assert_eq!(
            mutations,
            vec![Mutation::Update {
                old_index: 0,
                index: 0,
                value: json!({"id": 1, "text": "b"}),
            }]
        );
    }

    #[test]
    fn test_keyed_reorder_is_shuffle() {
        let old = vec![json!({"id": 1}), json!({"id": 2})];
        let new = vec![json!({"id": 2}), json!({"id": 1})];

        let mutations = detect_mutations(&old, &new, Some("id")).unwrap();

        assert_eq!(
            mutations,
            vec![
                Mutation::Shuffle { old_index: 1, index: 0, value: json!({"id": 2}) },
                Mutation::Shuffle { old_index: 0, index: 1, value: json!({"id": 1}) },
            ]
        );
    }

    #[test]
    fn test_keyed_append_is_add() {
        let old = vec![json!({"id": 1})];
        let new = vec![json!({"id": 1}), json!({"id": 2})];

        let mutations = detect_mutations(&old, &new, Some("id")).unwrap();

        assert_eq!(kinds(&mutations), vec![MutationKind::None, MutationKind::Add]);
        assert_eq!(mutations[1].old_index(), None);
        assert_eq!(mutations[1].index(), 1);
    }

    #[test]
    fn test_unkeyed_equal_values_move_without_add() {
        let old = vec!["a", "b", "c"];
        let new = vec!["c", "a", "b"];

        let mutations = detect_mutations(&old, &new, None).unwrap();

        assert_eq!(kinds(&mutations), vec![MutationKind::Shuffle; 3]);
        assert_eq!(
            mutations.iter().map(Mutation::old_index).collect::<Vec<_>>(),
            vec![Some(2), Some(0), Some(1)]
        );
        assert!(removed_indices(old.len(), &mutations).is_empty());
    }

    #[test]
    fn test_unkeyed_field_change_is_replace() {
        let old = vec![json!({"id": 0, "done": false}), json!({"id": 1, "done": false})];
        let new = vec![json!({"id": 0, "done": false}), json!({"id": 1, "done": true})];

        let mutations = detect_mutations(&old, &new, None).unwrap();

        assert_eq!(kinds(&mutations), vec![MutationKind::None, MutationKind::Add]);
        assert_eq!(removed_indices(old.len(), &mutations), vec![1]);
    }

    #[test]
    fn test_unkeyed_repeated_values_pair_in_order() {
        let old = vec!["•", "X", "•"];
        let new = vec!["•", "•", "O", "•"];

        let mutations = detect_mutations(&old, &new, None).unwrap();

        assert_eq!(
            mutations.iter().map(Mutation::old_index).collect::<Vec<_>>(),
            vec![Some(0), Some(2), None, None]
        );
        assert_eq!(removed_indices(old.len(), &mutations), vec![1]);
    }

    #[test]
    fn test_keyed_update_wins_over_shuffle() {
        let old = vec![json!({"id": 1, "n": 1}), json!({"id": 2, "n": 2})];
        let new = vec![json!({"id": 2, "n": 20}), json!({"id": 1, "n": 1})];

        let mutations = detect_mutations(&old, &new, Some("id")).unwrap();

        assert_eq!(kinds(&mutations), vec![MutationKind::Update, MutationKind::Shuffle]);
        assert_eq!(mutations[0].old_index(), Some(1));
    }

    #[test]
    fn test_removed_items() {
        let old = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
        let new = vec![json!({"id": 3})];

        let mutations = detect_mutations(&old, &new, Some("id")).unwrap();

        assert_eq!(kinds(&mutations), vec![MutationKind::Shuffle]);
        assert_eq!(removed_indices(old.len(), &mutations), vec![0, 1]);
    }

    #[test]
    fn test_key_types_stay_distinct() {
        let old = vec![json!({"id": 1})];
        let new = vec![json!({"id": "1"})];

        let mutations = detect_mutations(&old, &new, Some("id")).unwrap();
        assert_eq!(kinds(&mutations), vec![MutationKind::Add]);
    }

    #[test]
    fn test_keyed_non_record_is_rejected() {
        let old: Vec<Value> = vec![];
        let new = vec![json!(5)];

        let err = detect_mutations(&old, &new, Some("id")).unwrap_err();
        assert!(matches!(err, ForError::NonRecordItem { index: 0 }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let old = vec![json!({"id": 1})];
        let new = vec![json!({"id": 1}), json!({"name": "x"})];

        let err = detect_mutations(&old, &new, Some("id")).unwrap_err();
        assert!(matches!(err, ForError::MissingIdentityKey { index: 1, .. }));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let old = vec![json!({"id": 1}), json!({"id": 1})];
        let err = detect_mutations(&old, &old, Some("id")).unwrap_err();
        assert!(matches!(err, ForError::DuplicateIdentity { .. }));

        let old = vec![json!({"id": 1})];
        let new = vec![json!({"id": 2}), json!({"id": 2})];
        let err = detect_mutations(&old, &new, Some("id")).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: identity 2 appears more than once for key `id`");
    }

    #[test]
    fn test_empty_lists() {
        let empty: Vec<Value> = vec![];
        assert!(detect_mutations(&empty, &empty, Some("id")).unwrap().is_empty());

        let old = vec![json!({"id": 1})];
        let mutations = detect_mutations(&old, &empty, Some("id")).unwrap();
        assert!(mutations.is_empty());
        assert_eq!(removed_indices(1, &mutations), vec![0]);
    }

    #[test]
    fn test_mutation_kind_names() {
        assert_eq!(MutationKind::Add.to_string(), "add");
        assert_eq!(MutationKind::None.as_str(), "none");
        assert_eq!(MutationKind::Remove.as_str(), "remove");
    }
}
