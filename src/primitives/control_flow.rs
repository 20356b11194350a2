//! Control Flow Primitives - Reactive list rendering.
//!
//! [`for_each`] turns a reactive list of items into a reactive list of nodes.
//!
//! # Modes
//!
//! - **Projection** (`map`): every change re-runs `map` over the whole list.
//!   Nodes are thrown away and rebuilt; cheap to reason about, no per-item state.
//! - **Mutable** (`mutable_map`): each item gets a [`BoundSlot`] holding an item
//!   signal, an index signal and the node built from them. Across renders the
//!   slot is kept and only its signals are written, so the node updates in place
//!   and keeps whatever UI state it picked up (classes, focus, scroll).
//!
//! # Identity
//!
//! With `item_id_key` the value of that field decides which slot an item
//! belongs to:
//!
//! ```text
//! tasks = [{ id: 0, text: "some task" }, { id: 1, text: "other task" }]
//!
//! tasks[1].text = "another task"
//!
//! item_id_key = None      → slot 1 destroyed, new slot + node created;
//!                           runtime classes on the old node are lost
//! item_id_key = Some("id") → slot 1 kept, its item signal set to the new
//!                           value; the existing node re-renders its text
//! ```
//!
//! # Slot Lifecycle
//!
//! - Add: fresh signals, `mutable_map` called once
//! - Update: index and item signals written, node kept
//! - Shuffle: index signal written, node kept
//! - None: untouched
//! - Not mentioned by any mutation: dropped
//!
//! # Ownership
//!
//! In mutable mode the slots are written by a render effect, since signal
//! writes are not allowed inside a derived. The effect publishes the node list
//! into a signal, and the returned derived reads it. The effect lives as long
//! as the returned derived. Effects created inside `mutable_map` are children
//! of the render effect and stop when it runs again.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, error};

use super::types::PropValue;
use crate::error::ForError;
use crate::mutations::{detect_mutations, ensure_unique_identities, is_record, Mutation};
use spark_signals::{derived, effect_sync, signal, untrack, Derived, Signal};

// =============================================================================
// Props
// =============================================================================

/// Projection mapping: `(item, index) -> node`.
pub type MapFn<T, N> = Rc<dyn Fn(&T, usize) -> N>;

/// Mutable mapping: `(item signal, index signal) -> node`.
pub type MutableMapFn<T, N> = Rc<dyn Fn(Signal<T>, Signal<usize>) -> N>;

/// Properties for [`for_each`].
///
/// Exactly one of `map` and `mutable_map` must be set; `item_id_key` only
/// makes sense with `mutable_map`.
///
/// ```ignore
/// let todos = signal(vec![Todo { id: 0, text: "some task".into() }]);
///
/// let nodes = for_each(ForProps {
///     items: todos.clone().into(),
///     item_id_key: Some("id".into()),
///     mutable_map: Some(Rc::new(|todo: Signal<Todo>, _index| {
///         m::li(ElementProps {
///             inner_text: Some(getter(move || todo.get().text)),
///             ..Default::default()
///         })
///     })),
///     ..Default::default()
/// })?;
/// ```
pub struct ForProps<T: Clone + PartialEq + 'static, N> {
    /// The items. A plain `Vec` is wrapped into a signal.
    pub items: PropValue<Vec<T>>,
    /// Field that identifies an item across renders.
    pub item_id_key: Option<String>,
    /// Stateless projection.
    pub map: Option<MapFn<T, N>>,
    /// Stateful per-item mapping.
    pub mutable_map: Option<MutableMapFn<T, N>>,
}

impl<T: Clone + PartialEq + 'static, N> Default for ForProps<T, N> {
    fn default() -> Self {
        Self {
            items: PropValue::Static(Vec::new()),
            item_id_key: None,
            map: None,
            mutable_map: None,
        }
    }
}

// =============================================================================
// Bound Slot
// =============================================================================

/// Reactive state backing one rendered item.
pub struct BoundSlot<T, N> {
    index: Signal<usize>,
    item: Signal<T>,
    node: N,
}

impl<T: Clone + PartialEq + 'static, N> BoundSlot<T, N> {
    fn new(item: T, index: usize, map: &MutableMapFn<T, N>) -> Self {
        let index = signal(index);
        let item = signal(item);
        let node = map(item.clone(), index.clone());
        Self { index, item, node }
    }

    /// Current position signal.
    pub fn index(&self) -> &Signal<usize> {
        &self.index
    }

    /// Current item signal.
    pub fn item(&self) -> &Signal<T> {
        &self.item
    }

    /// The node built for this slot.
    pub fn node(&self) -> &N {
        &self.node
    }
}

// =============================================================================
// List Binder
// =============================================================================

/// Counts of what one reconciliation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub added: usize,
    pub updated: usize,
    pub shuffled: usize,
    pub unchanged: usize,
    pub removed: usize,
}

/// Keeps one [`BoundSlot`] per item in sync with successive list snapshots.
///
/// Owned by a single list; nothing else writes its slots.
pub struct ListBinder<T, N> {
    item_id_key: Option<String>,
    mutable_map: MutableMapFn<T, N>,
    old_list: Option<Vec<T>>,
    slots: Vec<Rc<BoundSlot<T, N>>>,
}

impl<T, N> ListBinder<T, N>
where
    T: Clone + PartialEq + Serialize + 'static,
    N: Clone,
{
    pub fn new(item_id_key: Option<String>, mutable_map: MutableMapFn<T, N>) -> Self {
        Self {
            item_id_key,
            mutable_map,
            old_list: None,
            slots: Vec::new(),
        }
    }

    /// Bring the slots in line with `items`.
    ///
    /// The first call builds one slot per item. Later calls diff against the
    /// previous snapshot and reuse slots wherever the identity survived.
    /// On error nothing is modified.
    ///
    /// # Panics
    ///
    /// If a mutation refers to a slot that does not exist (or an `Add` to one
    /// that does). That means the detector and the binder disagree about the
    /// previous list, and continuing would corrupt the rendered output.
    pub fn reconcile(&mut self, items: &[T]) -> Result<Reconciliation, ForError> {
        let Some(old_list) = self.old_list.as_deref() else {
            return Ok(self.rebuild(items));
        };

        let mutations = detect_mutations(old_list, items, self.item_id_key.as_deref())?;

        let mut report = Reconciliation::default();
        let mut old_slots: Vec<Option<Rc<BoundSlot<T, N>>>> =
            std::mem::take(&mut self.slots).into_iter().map(Some).collect();
        let mut slots = Vec::with_capacity(mutations.len());

        for mutation in mutations {
            let prior = mutation
                .old_index()
                .and_then(|old_index| old_slots.get_mut(old_index))
                .and_then(Option::take);

            let slot = match (mutation, prior) {
                (Mutation::Add { index, value }, None) => {
                    report.added += 1;
                    Rc::new(BoundSlot::new(value, index, &self.mutable_map))
                }
                (Mutation::Update { index, value, .. }, Some(slot)) => {
                    report.updated += 1;
                    slot.index.set(index);
                    slot.item.set(value);
                    slot
                }
                (Mutation::Shuffle { index, .. }, Some(slot)) => {
                    report.shuffled += 1;
                    slot.index.set(index);
                    slot
                }
                (Mutation::None { .. }, Some(slot)) => {
                    report.unchanged += 1;
                    slot
                }
                (mutation, prior) => panic!(
                    "list binder out of sync: `{}` mutation for position {} with old index {:?} \
                     {} a prior slot; `add` must have no old index, every other kind must \
                     resolve to an existing slot",
                    mutation.kind(),
                    mutation.index(),
                    mutation.old_index(),
                    if prior.is_some() { "found" } else { "did not find" },
                ),
            };
            slots.push(slot);
        }

        report.removed = old_slots.iter().filter(|slot| slot.is_some()).count();
        self.slots = slots;
        self.old_list = Some(items.to_vec());

        Ok(report)
    }

    /// Drop every slot and build fresh ones for `items`.
    pub fn rebuild(&mut self, items: &[T]) -> Reconciliation {
        let removed = self.slots.len();
        self.slots = items
            .iter()
            .enumerate()
            .map(|(index, item)| Rc::new(BoundSlot::new(item.clone(), index, &self.mutable_map)))
            .collect();
        self.old_list = Some(items.to_vec());

        Reconciliation {
            added: items.len(),
            removed,
            ..Default::default()
        }
    }

    /// Nodes in list order.
    pub fn nodes(&self) -> Vec<N> {
        self.slots.iter().map(|slot| slot.node.clone()).collect()
    }

    pub fn slots(&self) -> &[Rc<BoundSlot<T, N>>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// =============================================================================
// for_each()
// =============================================================================

/// Render a reactive list of items as a reactive list of nodes.
///
/// The returned derived follows the items and always holds exactly one node
/// per item, in item order. Inside a [`batch`](spark_signals::batch) the
/// mutable-mode list catches up when the batch ends.
///
/// # Errors
///
/// Fails before rendering anything when:
/// - `map` is combined with `item_id_key` or `mutable_map` ([`ForError::ConflictingMaps`])
/// - neither mapping is given ([`ForError::MissingMutableMap`])
/// - in mutable mode, the first item is not a record ([`ForError::NonRecordItem`])
/// - in mutable mode, the keyed items lack the key or repeat an identity
///
/// If a later snapshot is invalid, the error is logged and every slot is
/// rebuilt, so the output still matches the items one to one.
pub fn for_each<T, N>(props: ForProps<T, N>) -> Result<Derived<Vec<N>>, ForError>
where
    T: Clone + PartialEq + Serialize + 'static,
    N: Clone + PartialEq + 'static,
{
    let ForProps {
        items,
        item_id_key,
        map,
        mutable_map,
    } = props;
    let source = items.into_getter();

    if let Some(map) = map {
        if item_id_key.is_some() || mutable_map.is_some() {
            return Err(ForError::ConflictingMaps);
        }
        return Ok(derived(move || {
            let items = source();
            untrack(|| {
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| map(item, index))
                    .collect()
            })
        }));
    }

    let mutable_map = mutable_map.ok_or(ForError::MissingMutableMap)?;

    let initial = untrack(|| source());
    if let Some(first) = initial.first() {
        if !is_record(first)? {
            return Err(ForError::NonRecordItem { index: 0 });
        }
    }
    ensure_unique_identities(&initial, item_id_key.as_deref())?;

    let binder = Rc::new(RefCell::new(ListBinder::new(item_id_key, mutable_map)));
    let published: Signal<Vec<N>> = signal(Vec::new());
    let publish = published.clone();

    let render = effect_sync(move || {
        let items = source();
        let nodes = untrack(|| {
            let mut binder = binder.borrow_mut();
            match binder.reconcile(&items) {
                Ok(report) => debug!(
                    added = report.added,
                    updated = report.updated,
                    shuffled = report.shuffled,
                    unchanged = report.unchanged,
                    removed = report.removed,
                    "reconciled list"
                ),
                Err(err) => {
                    error!(%err, "cannot diff list snapshot; rebuilding every slot");
                    binder.rebuild(&items);
                }
            }
            binder.nodes()
        });
        publish.set(nodes);
    });

    Ok(derived(move || {
        let _render = &render;
        published.get()
    }))
}
