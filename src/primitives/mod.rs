//! Primitives - Reactive props and list rendering.
//!
//! - [`PropValue`] - Static value, signal or getter behind one type
//! - [`for_each`] - Reactive list rendering with per-item slots
//! - [`ListBinder`] - The slot bookkeeping behind `for_each`, usable on its own
//!
//! # Reactivity
//!
//! Pass props without reading them first:
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! ElementProps { class: Some(class_signal.into()), ..Default::default() };
//!
//! // WRONG - extracts value, breaks reactivity
//! ElementProps { class: Some(class_signal.get().into()), ..Default::default() };
//! ```

mod control_flow;
mod types;

pub use control_flow::*;
pub use types::*;
