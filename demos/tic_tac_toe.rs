//! Tic-Tac-Toe Example - Reactive classes, keyed history, scripted clicks
//!
//! This example demonstrates:
//! - A 3x3 grid whose cell classes and texts are getters over one signal
//! - A move history rendered by a keyed mutable list
//! - Runtime classes that survive reactive updates of their node
//! - An effect that prints the document after every move
//!
//! Run with: RUST_LOG=maya=debug cargo run --example tic_tac_toe

use std::rc::Rc;

use maya::dom::m;
use maya::{
    derived, effect, for_each, getter, signal, untrack, Derived, ElementProps, ForProps, Node,
    Signal,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Move {
    id: usize,
    player: char,
    cell: usize,
}

fn board_of(moves: &[Move]) -> [Option<char>; 9] {
    let mut board = [None; 9];
    for mv in moves {
        board[mv.cell] = Some(mv.player);
    }
    board
}

fn winner_of(board: &[Option<char>; 9]) -> Option<char> {
    LINES.iter().find_map(|[a, b, c]| match (board[*a], board[*b], board[*c]) {
        (Some(x), Some(y), Some(z)) if x == y && y == z => Some(x),
        _ => None,
    })
}

fn cell(index: usize, moves: Signal<Vec<Move>>, winner: Derived<Option<char>>) -> Node {
    let moves_for_class = moves.clone();
    let moves_for_text = moves.clone();

    m::button(ElementProps {
        class: Some(getter(move || match board_of(&moves_for_class.get())[index] {
            Some('X') => "cell x".to_string(),
            Some(_) => "cell o".to_string(),
            None => "cell".to_string(),
        })),
        inner_text: Some(getter(move || {
            board_of(&moves_for_text.get())[index]
                .map(String::from)
                .unwrap_or_default()
        })),
        onclick: Some(Rc::new(move || {
            if untrack(|| winner.get()).is_some() {
                return;
            }
            let current = untrack(|| moves.get());
            if board_of(&current)[index].is_some() {
                return;
            }
            let player = if current.len() % 2 == 0 { 'X' } else { 'O' };
            moves.update(|moves| {
                moves.push(Move {
                    id: moves.len(),
                    player,
                    cell: index,
                })
            });
        })),
        ..Default::default()
    })
}

fn history_entry(mv: Signal<Move>, index: Signal<usize>) -> Node {
    m::li(ElementProps {
        inner_text: Some(getter(move || {
            let mv = mv.get();
            format!("{}. {} takes cell {}", index.get() + 1, mv.player, mv.cell)
        })),
        ..Default::default()
    })
}

fn main() -> Result<(), maya::ForError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let moves: Signal<Vec<Move>> = signal(Vec::new());

    let moves_for_winner = moves.clone();
    let winner = derived(move || winner_of(&board_of(&moves_for_winner.get())));

    let cells: Vec<Node> = (0..9)
        .map(|index| cell(index, moves.clone(), winner.clone()))
        .collect();

    let history = for_each::<Move, Node>(ForProps {
        items: moves.clone().into(),
        item_id_key: Some("id".to_string()),
        mutable_map: Some(Rc::new(history_entry)),
        ..Default::default()
    })?;

    let moves_for_status = moves.clone();
    let winner_for_status = winner.clone();
    let app = m::div(ElementProps {
        class: Some("game".into()),
        children: vec![
            m::h1(ElementProps {
                inner_text: Some("Tic-Tac-Toe".into()),
                ..Default::default()
            })
            .into(),
            m::p(ElementProps {
                class: Some("status".into()),
                inner_text: Some(getter(move || match winner_for_status.get() {
                    Some(player) => format!("{player} wins"),
                    None if moves_for_status.with(Vec::len) == 9 => "Draw".to_string(),
                    None => {
                        let next = if moves_for_status.with(Vec::len) % 2 == 0 { 'X' } else { 'O' };
                        format!("Next: {next}")
                    }
                })),
                ..Default::default()
            })
            .into(),
            m::div(ElementProps {
                class: Some("board".into()),
                children: cells.iter().cloned().map(Into::into).collect(),
                ..Default::default()
            })
            .into(),
            m::ol(ElementProps {
                class: Some("history".into()),
                children: vec![history.into()],
                ..Default::default()
            })
            .into(),
        ],
        ..Default::default()
    });

    let app_for_effect = app.clone();
    let _stop_printer = effect(move || {
        println!("{}\n", app_for_effect.to_html());
    });

    // X takes the top row; the last click arrives after the game is decided.
    for index in [0, 3, 1, 4, 2, 8] {
        info!(cell = index, "click");
        cells[index].add_class("last-played");
        cells[index].click();
    }

    info!(winner = ?winner.get(), "game over");
    Ok(())
}
