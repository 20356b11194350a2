//! Node - Description of a document node with reactive parts.
//!
//! A node is built once. Its class, attributes and text are read through
//! [`PropValue`]s every time they are rendered, so a node follows its signals
//! without being rebuilt. Classes added at runtime with [`Node::add_class`]
//! live on the node itself; they survive reactive updates and disappear only
//! when the node is replaced.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use spark_signals::Derived;

use crate::primitives::{ClickCallback, PropValue};

use super::html;

// =============================================================================
// Children
// =============================================================================

/// One entry of an element's child list.
#[derive(Clone)]
pub enum Child {
    /// A single node.
    Node(Node),
    /// A reactive node list, typically from [`for_each`](crate::for_each).
    List(Derived<Vec<Node>>),
}

impl Child {
    /// The nodes this entry currently stands for.
    pub fn nodes(&self) -> Vec<Node> {
        match self {
            Child::Node(node) => vec![node.clone()],
            Child::List(list) => list.get(),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Derived<Vec<Node>>> for Child {
    fn from(list: Derived<Vec<Node>>) -> Self {
        Child::List(list)
    }
}

// =============================================================================
// Element Props
// =============================================================================

/// Properties for an element.
///
/// ```ignore
/// let selected = signal(false);
/// let selected_clone = selected.clone();
///
/// m::div(ElementProps {
///     class: Some(getter(move || {
///         let class = if selected_clone.get() { "tile selected" } else { "tile" };
///         class.to_string()
///     })),
///     children: vec![m::text("Hello").into()],
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct ElementProps {
    /// Space separated class list.
    pub class: Option<PropValue<String>>,
    /// Other attributes, rendered in order.
    pub attributes: Vec<(String, PropValue<String>)>,
    /// Text replacing the children when set.
    pub inner_text: Option<PropValue<String>>,
    pub children: Vec<Child>,
    pub onclick: Option<ClickCallback>,
}

/// Shorthand for an `(name, value)` attribute pair.
pub fn attr(name: &str, value: impl Into<PropValue<String>>) -> (String, PropValue<String>) {
    (name.to_string(), value.into())
}

// =============================================================================
// Node
// =============================================================================

pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) class: Option<PropValue<String>>,
    pub(crate) attributes: Vec<(String, PropValue<String>)>,
    pub(crate) inner_text: Option<PropValue<String>>,
    pub(crate) children: Vec<Child>,
    pub(crate) onclick: Option<ClickCallback>,
}

pub(crate) enum NodeKind {
    Element(Element),
    Text(PropValue<String>),
}

struct NodeInner {
    kind: NodeKind,
    runtime_classes: RefCell<Vec<String>>,
}

/// Handle to a node. Clones point at the same node; equality is identity.
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeInner>,
}

/// Create an element node with any tag.
pub fn element(tag: &str, props: ElementProps) -> Node {
    let ElementProps {
        class,
        attributes,
        inner_text,
        children,
        onclick,
    } = props;

    Node::new(NodeKind::Element(Element {
        tag: tag.to_string(),
        class,
        attributes,
        inner_text,
        children,
        onclick,
    }))
}

/// Create a text node.
pub fn text(content: impl Into<PropValue<String>>) -> Node {
    Node::new(NodeKind::Text(content.into()))
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                kind,
                runtime_classes: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.inner.kind
    }

    fn as_element(&self) -> Option<&Element> {
        match &self.inner.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    /// Tag name, `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|element| element.tag.as_str())
    }

    pub fn is_text(&self) -> bool {
        matches!(self.inner.kind, NodeKind::Text(_))
    }

    /// Current class list: the `class` prop followed by runtime classes.
    pub fn class_name(&self) -> String {
        let Some(element) = self.as_element() else {
            return String::new();
        };

        let declared = element.class.as_ref().map(PropValue::get).unwrap_or_default();
        let runtime = self.inner.runtime_classes.borrow();

        declared
            .split_whitespace()
            .chain(runtime.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add a class at runtime, the way an event handler would.
    pub fn add_class(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let mut classes = self.inner.runtime_classes.borrow_mut();
        if !classes.iter().any(|c| c == name) {
            classes.push(name.to_string());
        }
    }

    pub fn remove_class(&self, name: &str) {
        self.inner
            .runtime_classes
            .borrow_mut()
            .retain(|c| c != name.trim());
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == name)
    }

    /// Current value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return self.as_element().map(|_| self.class_name());
        }
        self.as_element()?
            .attributes
            .iter()
            .find(|(attribute, _)| attribute == name)
            .map(|(_, value)| value.get())
    }

    /// Rendered text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match &self.inner.kind {
            NodeKind::Text(content) => content.get(),
            NodeKind::Element(element) => match &element.inner_text {
                Some(text) => text.get(),
                None => self.children().iter().map(Node::text_content).collect(),
            },
        }
    }

    /// Current children, with reactive lists expanded.
    ///
    /// Empty for text nodes and for elements with `inner_text`.
    pub fn children(&self) -> Vec<Node> {
        match self.as_element() {
            Some(element) if element.inner_text.is_none() => {
                element.children.iter().flat_map(Child::nodes).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Invoke the click handler. Returns whether there was one.
    pub fn click(&self) -> bool {
        match self.as_element().and_then(|element| element.onclick.clone()) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Serialize the current state to HTML.
    pub fn to_html(&self) -> String {
        html::render_to_string(self)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            NodeKind::Text(content) => f.debug_tuple("Text").field(&content.get()).finish(),
            NodeKind::Element(element) => f
                .debug_struct("Element")
                .field("tag", &element.tag)
                .field("class", &self.class_name())
                .field("children", &element.children.len())
                .finish(),
        }
    }
}
