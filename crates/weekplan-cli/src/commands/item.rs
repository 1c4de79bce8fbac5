//! Scheduled item commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use tokio::runtime::Runtime;
use weekplan_core::{
    Config, ItemKind, LoadOutcome, ScheduleDb, ScheduleRepository, ScheduledItem, WeekBoard,
};

use super::{board_for, open_db, parse_start, runtime, CliResult};

#[derive(Subcommand)]
pub enum ItemAction {
    /// Schedule an event or a todo
    Add {
        /// Title shown in the grid
        #[arg(long)]
        title: String,
        /// Schedule a plain event with this description
        #[arg(long, conflicts_with = "todo", required_unless_present = "todo")]
        event: Option<String>,
        /// Schedule the todo with this ID
        #[arg(long)]
        todo: Option<String>,
        /// Start time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long)]
        minutes: i64,
    },
    /// Edit a scheduled item
    Update {
        /// Item ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New start time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: Option<String>,
        /// New duration in minutes
        #[arg(long)]
        minutes: Option<i64>,
        /// New event description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a scheduled item
    Delete {
        /// Item ID
        id: String,
    },
    /// List the items of a week, in day and start order
    List {
        /// Weeks relative to the current one
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ItemAction) -> CliResult {
    let config = Config::load_or_default();
    let db = open_db()?;
    let rt = runtime()?;

    match action {
        ItemAction::Add {
            title,
            event,
            todo,
            start,
            minutes,
        } => {
            let start = parse_start(&start)?;
            let kind = match (event, todo) {
                (_, Some(todo_id)) => {
                    if rt.block_on(db.todo_by_id(&todo_id))?.is_none() {
                        return Err(format!("Todo not found: {todo_id}").into());
                    }
                    ItemKind::Task { todo_id }
                }
                (Some(description), None) => ItemKind::Event { description },
                (None, None) => return Err("either --event or --todo is required".into()),
            };
            let item = ScheduledItem::try_new(
                db.new_id(),
                kind,
                start,
                minutes.saturating_mul(60_000),
                config.owner.id.clone(),
                title,
            )?;

            let mut board = load_board(&rt, &db, &config, item.day())?;
            rt.block_on(board.add_item(&db, item.clone()))?;
            log_week(&board);
            println!("Item created: {}", item.id);
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        ItemAction::Update {
            id,
            title,
            start,
            minutes,
            description,
        } => {
            let mut item = find_item(&db, &id)?;
            if let Some(t) = title {
                item = item.with_display_name(t);
            }
            if let Some(s) = start {
                item = item.with_start(parse_start(&s)?);
            }
            if let Some(m) = minutes {
                item = item.with_duration_minutes(m);
            }
            if let Some(d) = description {
                match &mut item.kind {
                    ItemKind::Event { description } => *description = d,
                    ItemKind::Task { .. } => {
                        return Err("--description only applies to events".into())
                    }
                }
            }

            let mut board = load_board(&rt, &db, &config, item.day())?;
            rt.block_on(board.update_item(&db, item.clone()))?;
            log_week(&board);
            println!("Item updated: {}", item.id);
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        ItemAction::Delete { id } => {
            let item = find_item(&db, &id)?;
            let mut board = load_board(&rt, &db, &config, item.day())?;
            rt.block_on(board.delete_item(&db, &item))?;
            log_week(&board);
            println!("Item deleted: {id}");
        }
        ItemAction::List { offset, json } => {
            let mut board = board_for(&config, offset, None)?;
            rt.block_on(board.refresh(&db))?;
            let items: Vec<&ScheduledItem> = board.grid().items().collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in items {
                    println!(
                        "{}  {}  {}min  {} ({})",
                        item.id,
                        item.start.format("%a %d %b %H:%M"),
                        item.duration_minutes(),
                        item.display_name,
                        item.kind.as_str(),
                    );
                }
            }
        }
    }
    Ok(())
}

/// Board for the week containing `day`, loaded so a mutation re-sorts the
/// whole week rather than an empty grid.
fn load_board(
    rt: &Runtime,
    db: &ScheduleDb,
    config: &Config,
    day: NaiveDate,
) -> CliResult<WeekBoard> {
    let mut board = board_for(config, 0, Some(day))?;
    if let LoadOutcome::Applied { rejected } = rt.block_on(board.refresh(db))? {
        for r in &rejected {
            log::warn!("item {} skipped: {}", r.item_id, r.reason);
        }
    }
    Ok(board)
}

fn log_week(board: &WeekBoard) {
    log::debug!(
        "{} now holds {} items",
        board.dates().range_label(),
        board.grid().len()
    );
}

fn find_item(db: &ScheduleDb, id: &str) -> CliResult<ScheduledItem> {
    Ok(db
        .get_scheduled_item(id)?
        .ok_or_else(|| format!("Item not found: {id}"))?)
}
