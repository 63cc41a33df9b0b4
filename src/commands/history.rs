use crate::session::{QueryRecord, SessionSnapshot, SessionStats};
use colored::Colorize;
use prettytable::{format, Table};

/// Characters of the question shown in the history listing
const PREVIEW_CHARS: usize = 30;

/// Print the history table, most recent first
pub fn print_history(snapshot: &SessionSnapshot) {
    if snapshot.history.is_empty() {
        println!(
            "{}",
            "No questions answered yet. Type a question to get started.".yellow()
        );
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "#".bold(),
        "Time".bold(),
        "Model".bold(),
        "Question".bold()
    ]);

    for (i, record) in snapshot.history.iter().rev().enumerate() {
        table.add_row(prettytable::row![
            (i + 1).to_string().cyan(),
            record.timestamp(),
            record.model(),
            record.query_preview(PREVIEW_CHARS)
        ]);
    }

    println!("\nQuery History:");
    table.printstd();
    println!();
    println!("Use {} to see an entry in full.", "/show <n>".cyan());
    println!();
}

/// Entry `n` of the history, counting from the most recent (1 = latest)
pub fn nth_most_recent(snapshot: &SessionSnapshot, n: usize) -> Option<&QueryRecord> {
    n.checked_sub(1)
        .and_then(|i| snapshot.history.iter().rev().nth(i))
}

/// Print entry `n` of the history, counting from the most recent
///
/// Returns false if there is no such entry.
pub fn print_nth_record(snapshot: &SessionSnapshot, n: usize) -> bool {
    match nth_most_recent(snapshot, n) {
        Some(record) => {
            print_record(record);
            true
        }
        None => false,
    }
}

/// Print one exchange in full
pub fn print_record(record: &QueryRecord) {
    println!();
    println!("{} {}", "Time: ".bold(), record.timestamp());
    println!("{} {}", "Model:".bold(), record.model());
    println!("{}", "Question".blue().bold());
    println!("{}", record.query());
    println!();
    println!("{}", "Answer".blue().bold());
    println!("{}", record.response());
    println!();
}

/// Print usage statistics
pub fn print_stats(snapshot: &SessionSnapshot) {
    let stats = SessionStats::from_snapshot(snapshot);

    println!("\nUsage Statistics:");
    println!("  Total queries:   {}", stats.total_queries.to_string().cyan());
    println!("  In history:      {}", stats.completed);
    println!("  Not in history:  {}", stats.unrecorded);
    match snapshot.last_rating {
        Some(score) => println!("  Last rating:     {}", "*".repeat(score as usize).yellow()),
        None => println!("  Last rating:     -"),
    }

    if !stats.per_model.is_empty() {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.add_row(prettytable::row!["Model".bold(), "Answers".bold()]);
        for (model, count) in &stats.per_model {
            table.add_row(prettytable::row![model, count]);
        }
        println!();
        table.printstd();
    }
    println!();
}
