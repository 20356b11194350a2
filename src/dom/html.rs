//! HTML serialization of the current node state.

use super::node::{Node, NodeKind};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Render a node and its subtree as HTML, reading every prop once.
pub fn render_to_string(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node.kind() {
        NodeKind::Text(content) => {
            html_escape::encode_text_to_string(content.get(), out);
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);

            let class = node.class_name();
            if !class.is_empty() {
                write_attribute("class", &class, out);
            }
            for (name, value) in &element.attributes {
                write_attribute(name, &value.get(), out);
            }
            out.push('>');

            if is_void_element(&element.tag) {
                return;
            }

            match &element.inner_text {
                Some(text) => {
                    html_escape::encode_text_to_string(text.get(), out);
                }
                None => {
                    for child in node.children() {
                        write_node(&child, out);
                    }
                }
            }

            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    html_escape::encode_double_quoted_attribute_to_string(value, out);
    out.push('"');
}

/// Escape text content.
pub fn escape_text(input: &str) -> String {
    html_escape::encode_text(input).into_owned()
}

/// Escape a value placed between double quotes.
pub fn escape_attribute(input: &str) -> String {
    html_escape::encode_double_quoted_attribute(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{attr, element, text, ElementProps};
    use spark_signals::signal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
        assert_eq!(escape_attribute("a\" onload=\"x"), "a&quot; onload=&quot;x");

        let link = element(
            "a",
            ElementProps {
                attributes: vec![attr("title", "say \"hi\"")],
                ..Default::default()
            },
        );
        assert_eq!(render_to_string(&link), "<a title=\"say &quot;hi&quot;\"></a>");
    }

    #[test]
    fn test_text_children_are_escaped() {
        let node = element(
            "p",
            ElementProps {
                children: vec![text("<script>x</script>").into()],
                ..Default::default()
            },
        );
        assert_eq!(render_to_string(&node), "<p>&lt;script&gt;x&lt;/script&gt;</p>");
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let image = element(
            "img",
            ElementProps {
                attributes: vec![attr("src", "/logo.png")],
                ..Default::default()
            },
        );
        assert_eq!(render_to_string(&image), "<img src=\"/logo.png\">");
    }

    #[test]
    fn test_render_reads_current_values() {
        let label = signal("one".to_string());
        let node = element(
            "span",
            ElementProps {
                class: Some("label".into()),
                children: vec![text(label.clone()).into()],
                ..Default::default()
            },
        );

        assert_eq!(node.to_html(), "<span class=\"label\">one</span>");
        label.set("two".into());
        assert_eq!(node.to_html(), "<span class=\"label\">two</span>");
    }
}
