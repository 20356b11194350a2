//! DOM - Element construction, class manipulation and HTML output.
//!
//! Nodes are retained: a reactive list returned by [`for_each`](crate::for_each)
//! hands back the same [`Node`] values across renders whenever their slot
//! survives, so state attached to a node (runtime classes, for example) stays
//! with it.

mod html;
pub mod m;
mod node;
mod page;

pub use html::{escape_attribute, escape_text, is_void_element, render_to_string};
pub use node::{attr, element, text, Child, ElementProps, Node};
pub use page::{html_page, HtmlPage};
