//! Element builders, one per common tag.
//!
//! ```ignore
//! use maya::dom::m;
//!
//! let list = m::ul(ElementProps {
//!     class: Some("menu".into()),
//!     children: vec![m::li(ElementProps::default()).into()],
//!     ..Default::default()
//! });
//! ```

pub use super::node::{element, text};

use super::node::{ElementProps, Node};

macro_rules! tag_builders {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", stringify!($name), ">` element.")]
            pub fn $name(props: ElementProps) -> Node {
                element(stringify!($name), props)
            }
        )*
    };
}

tag_builders!(
    div, span, p, h1, h2, h3, ul, ol, li, button, a, header, footer, nav, section, main, img,
    input, br,
);
