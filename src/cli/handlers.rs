use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output;
use crate::io::store::TaskStore;
use crate::model::task::Priority;
use crate::ops::task_ops;
use crate::view;

/// Resolve the task file path from the -f flag
pub fn task_file(cli_file: Option<PathBuf>) -> PathBuf {
    cli_file.unwrap_or_else(|| PathBuf::from("tasks.json"))
}

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let mut store = TaskStore::load(task_file(cli.file));

    match cli.command {
        // No subcommand is handled in main (launches the TUI)
        None => Ok(()),
        Some(Commands::Add(args)) => cmd_add(&mut store, args),
        Some(Commands::List(args)) => {
            cmd_list(&store, args, json);
            Ok(())
        }
        Some(Commands::Done(args)) => cmd_done(&mut store, args),
        Some(Commands::Fav(args)) => cmd_fav(&mut store, args),
        Some(Commands::Edit(args)) => cmd_edit(&mut store, args),
        Some(Commands::Delete(args)) => cmd_delete(&mut store, args),
    }
}

fn parse_priority(input: &str) -> Result<Priority, String> {
    Priority::parse(input).ok_or_else(|| format!("unknown priority '{input}' (low, medium, high)"))
}

fn cmd_add(store: &mut TaskStore, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let priority = parse_priority(&args.priority)?;
    let id = task_ops::add_task(store, &args.text, priority)?;
    let task = store.get(id).ok_or("task vanished after add")?;
    println!("added '{}' ({})", task.text, task.priority);
    Ok(())
}

fn cmd_list(store: &TaskStore, args: ListArgs, json: bool) {
    let rows = view::visible_rows(store.tasks(), args.favorites);
    if json {
        output::print_rows_json(&rows);
    } else {
        output::print_rows(&rows);
    }
}

fn cmd_done(store: &mut TaskStore, args: PositionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let id = task_ops::toggle_completion_at(store, args.favorites, index)?;
    let task = store.get(id).ok_or("task vanished")?;
    println!("'{}' is now {}", task.text, task.status);
    Ok(())
}

fn cmd_fav(store: &mut TaskStore, args: PositionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let id = view::resolve_index(store.tasks(), args.favorites, index)
        .ok_or_else(|| task_ops::TaskError::NoSelection.to_string())?;
    task_ops::toggle_favorite(store, id)?;
    let task = store.get(id).ok_or("task vanished")?;
    let state = if task.favorite { "favorite" } else { "not a favorite" };
    println!("'{}' is now {}", task.text, state);
    Ok(())
}

fn cmd_edit(store: &mut TaskStore, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let priority = match &args.priority {
        Some(input) => parse_priority(input)?,
        None => {
            let id = view::resolve_index(store.tasks(), args.favorites, index)
                .ok_or_else(|| task_ops::TaskError::NoSelection.to_string())?;
            store.get(id).map(|t| t.priority).unwrap_or_default()
        }
    };
    task_ops::edit_at(store, args.favorites, index, args.text.clone(), priority)?;
    println!("updated task {}", args.position);
    Ok(())
}

fn cmd_delete(store: &mut TaskStore, args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let id = view::resolve_index(store.tasks(), args.favorites, index)
        .ok_or_else(|| task_ops::TaskError::NoSelection.to_string())?;
    let text = store.get(id).map(|t| t.text.clone()).unwrap_or_default();

    if !args.yes && !confirm(&format!("delete '{text}'? [y/N] "))? {
        return Ok(());
    }

    task_ops::delete_at(store, args.favorites, index)?;
    println!("deleted '{text}'");
    Ok(())
}

fn to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}

fn confirm(prompt: &str) -> Result<bool, io::Error> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
