use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick", about = concat!("tick v", env!("CARGO_PKG_VERSION"), " - a tiny task list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Task file (default: tasks.json in the current directory)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Positions refer to 1-based rows of the sorted list `tick list` prints.
#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(AddArgs),
    /// List tasks in display order
    List(ListArgs),
    /// Toggle a task's completion status
    Done(PositionArgs),
    /// Toggle a task's favorite flag
    Fav(PositionArgs),
    /// Edit a task's text and priority
    Edit(EditArgs),
    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    pub text: String,
    /// Priority: low, medium, or high
    #[arg(short, long, default_value = "medium")]
    pub priority: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show favorites only
    #[arg(long)]
    pub favorites: bool,
}

#[derive(Args)]
pub struct PositionArgs {
    /// Display position (1-based)
    pub position: usize,
    /// Resolve the position within the favorites-only view
    #[arg(long)]
    pub favorites: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Display position (1-based)
    pub position: usize,
    /// New task description
    pub text: String,
    /// New priority: low, medium, or high (unchanged if omitted)
    #[arg(short, long)]
    pub priority: Option<String>,
    /// Resolve the position within the favorites-only view
    #[arg(long)]
    pub favorites: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Display position (1-based)
    pub position: usize,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
    /// Resolve the position within the favorites-only view
    #[arg(long)]
    pub favorites: bool,
}
