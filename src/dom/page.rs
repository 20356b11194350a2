//! Page - A full HTML document around an app node.

use super::html::{escape_attribute, escape_text};
use super::node::Node;

/// A full HTML document.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    pub title: String,
    pub lang: String,
    /// Stylesheet URLs, linked in order.
    pub stylesheets: Vec<String>,
    /// Script URLs, loaded at the end of the body.
    pub scripts: Vec<String>,
    pub body: Node,
}

/// Build a page whose body is the node returned by `app`.
pub fn html_page(title: impl Into<String>, app: impl FnOnce() -> Node) -> HtmlPage {
    HtmlPage {
        title: title.into(),
        lang: "en".to_string(),
        stylesheets: Vec::new(),
        scripts: Vec::new(),
        body: app(),
    }
}

impl HtmlPage {
    pub fn stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    pub fn script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }

    /// Serialize the document with the body's current state.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n", escape_attribute(&self.lang)));
        out.push_str("<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        out.push_str(&format!("<title>{}</title>\n", escape_text(&self.title)));
        for href in &self.stylesheets {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape_attribute(href)
            ));
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str(&self.body.to_html());
        out.push('\n');
        for src in &self.scripts {
            out.push_str(&format!("<script src=\"{}\"></script>\n", escape_attribute(src)));
        }
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }
}
