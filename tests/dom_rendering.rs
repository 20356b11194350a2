//! HTML output of node trees containing reactive lists.

use std::rc::Rc;

use indoc::indoc;
use maya::dom::{attr, m};
use maya::{
    effect, for_each, getter, html_page, signal, ElementProps, ForProps, Node, Signal,
};
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Todo {
    id: u32,
    text: String,
}

fn todo(id: u32, text: &str) -> Todo {
    Todo {
        id,
        text: text.to_string(),
    }
}

fn todo_item(item: Signal<Todo>, _index: Signal<usize>) -> Node {
    m::li(ElementProps {
        class: Some("todo".into()),
        inner_text: Some(getter(move || item.get().text)),
        ..Default::default()
    })
}

fn todo_list(todos: Signal<Vec<Todo>>, item_id_key: Option<&str>) -> Node {
    let items = for_each::<Todo, Node>(ForProps {
        items: todos.into(),
        item_id_key: item_id_key.map(str::to_string),
        mutable_map: Some(Rc::new(todo_item)),
        ..Default::default()
    })
    .unwrap();

    m::ul(ElementProps {
        children: vec![items.into()],
        ..Default::default()
    })
}

#[test]
fn test_list_renders_in_item_order() {
    let todos = signal(vec![todo(1, "wash"), todo(2, "cook")]);
    let list = todo_list(todos.clone(), Some("id"));

    assert_eq!(
        list.to_html(),
        r#"<ul><li class="todo">wash</li><li class="todo">cook</li></ul>"#
    );

    todos.set(vec![todo(2, "cook"), todo(3, "eat & sleep"), todo(1, "wash")]);

    assert_eq!(
        list.to_html(),
        r#"<ul><li class="todo">cook</li><li class="todo">eat &amp; sleep</li><li class="todo">wash</li></ul>"#
    );
}

#[test]
fn test_keyed_list_keeps_classes_added_at_runtime() {
    let todos = signal(vec![todo(1, "wash"), todo(2, "cook")]);
    let list = todo_list(todos.clone(), Some("id"));

    list.children()[1].add_class("done");
    todos.update(|todos| todos[1].text = "cook dinner".to_string());

    assert_eq!(
        list.to_html(),
        r#"<ul><li class="todo">wash</li><li class="todo done">cook dinner</li></ul>"#
    );
}

#[test]
fn test_unkeyed_list_loses_classes_of_edited_items() {
    let todos = signal(vec![todo(1, "wash"), todo(2, "cook")]);
    let list = todo_list(todos.clone(), None);

    list.children()[0].add_class("done");
    list.children()[1].add_class("done");
    todos.update(|todos| todos[1].text = "cook dinner".to_string());

    assert_eq!(
        list.to_html(),
        r#"<ul><li class="todo done">wash</li><li class="todo">cook dinner</li></ul>"#
    );
}

#[test]
fn test_effect_sees_finished_list() {
    let todos = signal(vec![todo(1, "wash")]);
    let list = todo_list(todos.clone(), Some("id"));
    let rendered = Rc::new(std::cell::RefCell::new(Vec::new()));

    let rendered_clone = rendered.clone();
    let list_clone = list.clone();
    let _stop_watcher = effect(move || rendered_clone.borrow_mut().push(list_clone.to_html()));

    todos.update(|todos| todos.push(todo(2, "cook")));
    todos.set(vec![todo(2, "cook")]);

    assert_eq!(
        *rendered.borrow(),
        vec![
            r#"<ul><li class="todo">wash</li></ul>"#.to_string(),
            r#"<ul><li class="todo">wash</li><li class="todo">cook</li></ul>"#.to_string(),
            r#"<ul><li class="todo">cook</li></ul>"#.to_string(),
        ]
    );
}

#[test]
fn test_full_page() {
    let links = signal(vec![todo(1, "Home"), todo(2, "Docs")]);
    let nav = for_each::<Todo, Node>(ForProps {
        items: links.clone().into(),
        map: Some(Rc::new(|link: &Todo, _: usize| {
            m::a(ElementProps {
                attributes: vec![attr("href", format!("/{}", link.text.to_lowercase()))],
                inner_text: Some(link.text.clone().into()),
                ..Default::default()
            })
        })),
        ..Default::default()
    })
    .unwrap();

    let page = html_page("Docs", move || {
        m::nav(ElementProps {
            children: vec![nav.into()],
            ..Default::default()
        })
    });

    assert_eq!(
        page.render(),
        indoc! {r#"
            <!DOCTYPE html>
            <html lang="en">
            <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>Docs</title>
            </head>
            <body>
            <nav><a href="/home">Home</a><a href="/docs">Docs</a></nav>
            </body>
            </html>
        "#}
    );
}
