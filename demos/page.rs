//! Page Example - Generate a static HTML page
//!
//! Builds a small landing page with a header, a heading and a navigation
//! list projected from plain data, then prints the document.
//!
//! Run with: cargo run --example page

use std::rc::Rc;

use maya::dom::{attr, m};
use maya::{for_each, html_page, signal, ElementProps, ForProps, Node};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Link {
    label: String,
    href: String,
}

fn link(label: &str, href: &str) -> Link {
    Link {
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn nav_item(link: &Link, _index: usize) -> Node {
    m::li(ElementProps {
        children: vec![m::a(ElementProps {
            attributes: vec![attr("href", link.href.clone())],
            inner_text: Some(link.label.clone().into()),
            ..Default::default()
        })
        .into()],
        ..Default::default()
    })
}

fn main() -> Result<(), maya::ForError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let links = signal(vec![link("Home", "/"), link("Docs", "/docs"), link("Blog", "/blog")]);

    let nav_links = for_each::<Link, Node>(ForProps {
        items: links.clone().into(),
        map: Some(Rc::new(nav_item)),
        ..Default::default()
    })?;

    let page = html_page("maya", move || {
        m::div(ElementProps {
            class: Some("app".into()),
            children: vec![
                m::header(ElementProps {
                    children: vec![
                        m::h1(ElementProps {
                            inner_text: Some("Hello from maya".into()),
                            ..Default::default()
                        })
                        .into(),
                        m::nav(ElementProps {
                            children: vec![m::ul(ElementProps {
                                children: vec![nav_links.into()],
                                ..Default::default()
                            })
                            .into()],
                            ..Default::default()
                        })
                        .into(),
                    ],
                    ..Default::default()
                })
                .into(),
                m::p(ElementProps {
                    inner_text: Some("Pages are plain nodes rendered to HTML.".into()),
                    ..Default::default()
                })
                .into(),
            ],
            ..Default::default()
        })
    })
    .stylesheet("/style.css");

    println!("{}", page.render());

    links.update(|links| links.push(link("About", "/about")));
    println!("--- after adding a link ---\n");
    println!("{}", page.render());

    Ok(())
}
