//! Primitive types - Reactive prop values and callbacks.
//!
//! Props accept static values, signals and getters alike; binding them
//! keeps the reactive connection intact.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use spark_signals::{derived, signal, Derived, Signal};

// =============================================================================
// Callback Types
// =============================================================================

/// Click handler (Rc so it can be cloned into closures).
pub type ClickCallback = Rc<dyn Fn()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value. Tracked when called inside a derived or effect.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Whether reading this value can ever yield something different.
    pub fn is_reactive(&self) -> bool {
        !matches!(self, PropValue::Static(_))
    }

    /// Turn the prop into a getter.
    ///
    /// A static value is first wrapped into a signal, so every source looks
    /// the same to the caller.
    pub fn into_getter(self) -> Rc<dyn Fn() -> T> {
        match self {
            PropValue::Static(v) => {
                let cell = signal(v);
                Rc::new(move || cell.get())
            }
            PropValue::Signal(s) => Rc::new(move || s.get()),
            PropValue::Getter(f) => f,
        }
    }
}

/// Shorthand for `PropValue::Getter(Rc::new(f))`.
pub fn getter<T: Clone + PartialEq + 'static>(f: impl Fn() -> T + 'static) -> PropValue<T> {
    PropValue::Getter(Rc::new(f))
}

/// A derived value whose computation also receives its previous result.
///
/// `compute` gets `None` on the first run.
pub fn derived_with<T, F>(compute: F) -> Derived<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn(Option<T>) -> T + 'static,
{
    let previous: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
    derived(move || {
        let prior = previous.take();
        let next = compute(prior);
        *previous.borrow_mut() = Some(next.clone());
        next
    })
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl<T: Clone + PartialEq + 'static> From<Derived<T>> for PropValue<T> {
    fn from(derived: Derived<T>) -> Self {
        PropValue::Getter(Rc::new(move || derived.get()))
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

impl<T: Clone + PartialEq + fmt::Debug + 'static> fmt::Debug for PropValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Static(v) => f.debug_tuple("Static").field(v).finish(),
            PropValue::Signal(s) => f.debug_tuple("Signal").field(s).finish(),
            PropValue::Getter(_) => f.write_str("Getter(..)"),
        }
    }
}
