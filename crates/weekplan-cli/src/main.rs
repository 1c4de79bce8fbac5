use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "weekplan", version, about = "Weekly schedule planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the week grid
    Week {
        #[command(subcommand)]
        action: commands::week::WeekAction,
    },
    /// Scheduled item management
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
    /// Todo management
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Week { action } => commands::week::run(action),
        Commands::Item { action } => commands::item::run(action),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
