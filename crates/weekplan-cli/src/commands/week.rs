//! Week grid commands for CLI.

use clap::Subcommand;
use serde::Serialize;
use std::collections::HashMap;
use weekplan_core::week::RejectedItem;
use weekplan_core::{Config, ItemGeometry, ItemKind, Todo, WeekBoard};

use super::{board_for, open_db, parse_date, runtime, CliResult};

#[derive(Subcommand)]
pub enum WeekAction {
    /// Show the laid-out week
    Show {
        /// Weeks relative to the current one
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,
        /// Show the week containing this date (YYYY-MM-DD) instead
        #[arg(long, conflicts_with = "offset")]
        date: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the seven dates of a week
    Dates {
        /// Weeks relative to the current one
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Geometry of one item plus, for a task, the todo it schedules.
#[derive(Serialize)]
struct PlacedItem<'a> {
    #[serde(flatten)]
    geometry: ItemGeometry<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    todo: Option<&'a Todo>,
}

#[derive(Serialize)]
struct DayView<'a> {
    date: chrono::NaiveDate,
    label: String,
    items: Vec<PlacedItem<'a>>,
}

#[derive(Serialize)]
struct WeekView<'a> {
    offset: i64,
    range: String,
    days: Vec<DayView<'a>>,
    rejected: &'a [RejectedItem],
}

pub fn run(action: WeekAction) -> CliResult {
    match action {
        WeekAction::Show { offset, date, json } => {
            let config = Config::load_or_default();
            let date = date.as_deref().map(parse_date).transpose()?;
            let mut board = board_for(&config, offset, date)?;
            let db = open_db()?;
            let rt = runtime()?;
            rt.block_on(board.refresh(&db))?;
            let todos = rt.block_on(board.resolve_todos(&db))?;

            let engine = config.layout_engine();
            let view = week_view(&board, board.layout_week(&engine).into(), &todos);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_week(&view);
            }
        }
        WeekAction::Dates { offset, json } => {
            let config = Config::load_or_default();
            let board = board_for(&config, offset, None)?;
            let dates = board.dates();
            if json {
                println!("{}", serde_json::to_string_pretty(dates)?);
            } else {
                println!("{}", dates.range_label());
                for (date, label) in dates.days().iter().zip(dates.day_labels()) {
                    println!("{date}  {label}");
                }
            }
        }
    }
    Ok(())
}

fn week_view<'a>(
    board: &'a WeekBoard,
    layout: Vec<Vec<ItemGeometry<'a>>>,
    todos: &'a HashMap<String, Todo>,
) -> WeekView<'a> {
    let dates = board.dates();
    let days = dates
        .days()
        .iter()
        .zip(dates.day_labels())
        .zip(layout)
        .map(|((&date, label), geometry)| DayView {
            date,
            label,
            items: geometry
                .into_iter()
                .map(|geometry| {
                    let todo = match &geometry.item.kind {
                        ItemKind::Task { todo_id } => todos.get(todo_id),
                        ItemKind::Event { .. } => None,
                    };
                    PlacedItem { geometry, todo }
                })
                .collect(),
        })
        .collect();
    WeekView {
        offset: board.offset(),
        range: dates.range_label(),
        days,
        rejected: board.rejected(),
    }
}

fn print_week(view: &WeekView<'_>) {
    println!("{}", view.range);
    for day in &view.days {
        println!();
        println!("{}", day.label);
        if day.items.is_empty() {
            println!("  (nothing scheduled)");
        }
        for placed in &day.items {
            let g = &placed.geometry;
            let item = g.item;
            let todo = match (&item.kind, placed.todo) {
                (ItemKind::Task { .. }, Some(todo)) => {
                    let mark = if todo.done { "x" } else { " " };
                    format!("  todo [{mark}] {}", todo.title)
                }
                (ItemKind::Task { todo_id }, None) => format!("  todo {todo_id} missing"),
                (ItemKind::Event { .. }, _) => String::new(),
            };
            println!(
                "  {}-{}  {:<5} x={:.2} w={:.2} y={:.1}-{:.1}  {} [{}]{todo}",
                item.start.format("%H:%M"),
                item.end().format("%H:%M"),
                item.kind.as_str(),
                g.x_offset,
                g.width_fraction,
                g.y_offset,
                g.y_end(),
                item.display_name,
                item.id,
            );
        }
    }
    for rejected in view.rejected {
        log::warn!("skipped item {}: {}", rejected.item_id, rejected.reason);
    }
}
