use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::view::Row;

/// JSON shape for one listed task
#[derive(Serialize)]
pub struct RowJson {
    pub position: usize,
    pub favorite: bool,
    pub text: String,
    pub priority: String,
    pub date: String,
    pub status: String,
}

impl RowJson {
    fn from_row(row: &Row, position: usize) -> RowJson {
        RowJson {
            position,
            favorite: row.favorite,
            text: row.text.clone(),
            priority: row.priority.to_string(),
            date: row.date.clone(),
            status: row.status.to_string(),
        }
    }
}

/// Print the task list as JSON
pub fn print_rows_json(rows: &[Row]) {
    let out: Vec<RowJson> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| RowJson::from_row(row, i + 1))
        .collect();
    println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
}

/// Print the task list as aligned text columns
pub fn print_rows(rows: &[Row]) {
    if rows.is_empty() {
        println!("no tasks");
        return;
    }
    let text_width = rows
        .iter()
        .map(|r| r.text.width())
        .max()
        .unwrap_or(0)
        .max("Task".width());

    println!(
        "  #    {:<width$}  {:<8}  {:<16}  Status",
        "Task",
        "Priority",
        "Created",
        width = text_width
    );
    for (i, row) in rows.iter().enumerate() {
        let pad = text_width - row.text.width();
        println!(
            "{:>3} {} {}{}  {:<8}  {:<16}  {}",
            i + 1,
            row.star(),
            row.text,
            " ".repeat(pad),
            row.priority.as_str(),
            row.date,
            row.status.as_str(),
        );
    }
}
