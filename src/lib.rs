//! # maya
//!
//! Reactive UI library for building browser document structures in Rust.
//!
//! ## Architecture
//!
//! Nodes are described once and read their class, attributes and text through
//! reactive props. Lists are the interesting part: [`for_each`] keeps one slot
//! per item and, when the list changes, reuses slots instead of rebuilding
//! nodes, so UI state attached to a node survives edits to its item.
//!
//! ```text
//! Signal<Vec<T>> → for_each (detect_mutations → ListBinder) → Derived<Vec<Node>> → parent children
//! ```
//!
//! ## Modules
//!
//! - [`mutations`] - Diffing two list snapshots into per-item mutations
//! - [`primitives`] - Reactive props and `for_each`
//! - [`dom`] - Nodes, element builders, HTML output
//! - [`error`] - Errors raised by list setup and diffing
//!
//! Signals, deriveds, effects and batching come from [`spark_signals`] and are
//! re-exported here.

pub mod dom;
pub mod error;
pub mod mutations;
pub mod primitives;

pub use spark_signals;

// Re-export commonly used items
pub use error::ForError;

pub use mutations::{detect_mutations, removed_indices, Mutation, MutationKind};

pub use spark_signals::{
    batch, derived, effect, effect_sync, flush_sync, is_tracking, signal, untrack, Derived, Signal,
};

pub use primitives::{
    derived_with, for_each, getter, BoundSlot, ClickCallback, ForProps, ListBinder, MapFn,
    MutableMapFn, PropValue, Reconciliation,
};

pub use dom::{
    attr, element, html_page, render_to_string, text, Child, ElementProps, HtmlPage, Node,
};
