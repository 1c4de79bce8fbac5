//! Todo commands for CLI.

use clap::Subcommand;
use weekplan_core::{Config, ScheduleRepository, Todo, TodoRepository};

use super::{open_db, parse_start, runtime, CliResult};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Create a todo
    Add {
        /// Todo title
        title: String,
        /// Todo description
        #[arg(long)]
        description: Option<String>,
        /// Due time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        due: Option<String>,
    },
    /// List todos
    List {
        /// Include completed todos
        #[arg(long)]
        all: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mark a todo as done
    Done {
        /// Todo ID
        id: String,
    },
}

pub fn run(action: TodoAction) -> CliResult {
    let db = open_db()?;
    let rt = runtime()?;

    match action {
        TodoAction::Add {
            title,
            description,
            due,
        } => {
            let config = Config::load_or_default();
            let mut todo = Todo::new(db.new_id(), title, config.owner.id);
            if let Some(d) = description {
                todo = todo.with_description(d);
            }
            if let Some(d) = due {
                todo = todo.with_due(parse_start(&d)?);
            }
            rt.block_on(db.add_todo(&todo))?;
            println!("Todo created: {}", todo.id);
            println!("{}", serde_json::to_string_pretty(&todo)?);
        }
        TodoAction::List { all, json } => {
            let todos: Vec<Todo> = rt
                .block_on(db.list_todos())?
                .into_iter()
                .filter(|todo| all || !todo.done)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&todos)?);
            } else {
                for todo in &todos {
                    let mark = if todo.done { "x" } else { " " };
                    let due = todo
                        .due
                        .map(|d| format!("  due {}", d.format("%Y-%m-%d %H:%M")))
                        .unwrap_or_default();
                    println!("[{mark}] {}  {}{due}", todo.id, todo.title);
                }
            }
        }
        TodoAction::Done { id } => {
            let todo = rt
                .block_on(db.todo_by_id(&id))?
                .ok_or_else(|| format!("Todo not found: {id}"))?
                .with_done(true);
            rt.block_on(db.update_todo(&todo))?;
            println!("Todo done: {id}");
        }
    }
    Ok(())
}
