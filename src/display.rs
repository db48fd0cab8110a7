//! Terminal rendering of todos, statistics and status messages.

use chrono::{DateTime, Local, TimeZone, Utc};
use colored::{ColoredString, Colorize};

use crate::models::{Priority, Todo, TodoStats, DEFAULT_CATEGORY};

const TITLE_WIDTH: usize = 35;
const BAR_LENGTH: usize = 20;

pub fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "[HIGH]".red(),
        Priority::Medium => "[MEDIUM]".yellow(),
        Priority::Low => "[LOW]".green(),
    }
}

pub fn category_label(category: &str) -> ColoredString {
    let category = if category.is_empty() { DEFAULT_CATEGORY } else { category };
    format!("[{}]", category.to_uppercase()).cyan()
}

pub fn status_label(todo: &Todo) -> ColoredString {
    if todo.completed {
        "[DONE]".green()
    } else {
        "[PENDING]".yellow()
    }
}

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let head: String = title.chars().take(TITLE_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

/// Due date relative to the calendar day of `now`.
pub fn format_due_date<Tz: TimeZone>(
    due: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> ColoredString {
    let Some(due) = due else {
        return "No due date".dimmed();
    };

    let today = now.date_naive();
    let day = due.with_timezone(&now.timezone()).date_naive();

    if day < today {
        "OVERDUE".red()
    } else if day == today {
        "TODAY".blue()
    } else if Some(day) == today.succ_opt() {
        "TOMORROW".yellow()
    } else {
        day.format("%b %-d").to_string().normal()
    }
}

pub fn format_timestamp<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%b %-d, %H:%M").to_string()
}

/// One line per todo, in the order given.
pub fn render_todos<Tz: TimeZone>(todos: &[Todo], title: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if todos.is_empty() {
        return format!(
            "{}\n{}\n",
            "No todos found!".yellow(),
            "Add your first todo to get started.".dimmed()
        );
    }

    let mut out = format!("\n{}\n", title.bold());
    out.push_str(&format!(
        "{}\n",
        format!(
            "{:<8} {:<10} {:<10} {:<12} {:<35} {:<12} {}",
            "ID", "Status", "Priority", "Category", "Title", "Due Date", "Created"
        )
        .bold()
    ));
    for todo in todos {
        let title = truncate_title(&todo.title);
        let title = if todo.completed {
            title.strikethrough().dimmed()
        } else {
            title.normal()
        };
        out.push_str(&format!(
            "{:<8} {:<10} {:<10} {:<12} {:<35} {:<12} {}\n",
            todo.short_id().dimmed(),
            status_label(todo),
            priority_label(todo.priority),
            category_label(&todo.category),
            title,
            format_due_date(todo.due_date, now),
            format_timestamp(todo.created_at, &now.timezone()).dimmed(),
        ));
    }
    out
}

pub fn render_todo_details<Tz: TimeZone>(todo: &Todo, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let tz = now.timezone();
    let status = if todo.completed {
        "[COMPLETED]".green()
    } else {
        "[PENDING]".yellow()
    };
    let description = if todo.description.is_empty() {
        "No description".dimmed()
    } else {
        todo.description.as_str().normal()
    };

    let mut lines = vec![
        format!("Todo Details - {}", todo.short_id()).bold().to_string(),
        format!("Status: {}", status),
        format!("Title: {}", todo.title.bold()),
        format!("Description: {}", description),
        format!("Priority: {}", priority_label(todo.priority)),
        format!("Category: {}", category_label(&todo.category)),
        format!("Due Date: {}", format_due_date(todo.due_date, now)),
        format!("Created: {}", format_timestamp(todo.created_at, &tz)),
    ];
    if let (true, Some(done)) = (todo.completed, todo.completed_at) {
        lines.push(format!("Completed: {}", format_timestamp(done, &tz).green()));
    }

    lines.join("\n") + "\n"
}

pub fn completion_bar(rate: u8) -> String {
    let filled = ((rate.min(100) as f64 / 100.0) * BAR_LENGTH as f64).round() as usize;
    let percent = format!("{}%", rate);
    let percent = match rate {
        75.. => percent.green(),
        50.. => percent.yellow(),
        _ => percent.red(),
    };
    format!(
        "{}{} {}",
        "█".repeat(filled).green(),
        "░".repeat(BAR_LENGTH - filled).bright_black(),
        percent
    )
}

pub fn render_stats(stats: &TodoStats) -> String {
    [
        "Statistics".bold().to_string(),
        format!("{} {}", "Total Todos:".bold(), stats.total),
        format!("{} {}", "Completed:".bold(), stats.completed.to_string().green()),
        format!("{} {}", "Pending:".bold(), stats.pending.to_string().yellow()),
        format!("{} {}", "Due Today:".bold(), stats.today.to_string().blue()),
        format!("{} {}", "Overdue:".bold(), stats.overdue.to_string().red()),
        String::new(),
        format!(
            "{} {}",
            "Completion Rate:".bold(),
            completion_bar(stats.completion_rate())
        ),
    ]
    .join("\n")
        + "\n"
}

pub fn render_categories<'a>(categories: impl IntoIterator<Item = &'a String>) -> String {
    let mut out = format!("{}\n", "Available Categories:".bold());
    for (i, category) in categories.into_iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, category_label(category)));
    }
    out
}

pub fn show_todos(todos: &[Todo], title: &str) {
    print!("{}", render_todos(todos, title, &Local::now()));
}

pub fn show_todo_details(todo: &Todo) {
    print!("{}", render_todo_details(todo, &Local::now()));
}

pub fn show_stats(stats: &TodoStats) {
    print!("{}", render_stats(stats));
}

pub fn show_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

pub fn show_error(message: &str) {
    println!("{} {}", "ERROR:".red().bold(), message);
}

pub fn show_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};

    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn now() -> DateTime<FixedOffset> {
        "2026-10-18T10:30:00+02:00".parse().unwrap()
    }

    fn sample(title: &str) -> Todo {
        Todo {
            id: "2f1c9e0a-77aa-4d1e-9f3b-0c5d6e7f8a9b".to_string(),
            title: title.to_string(),
            description: String::new(),
            completed: false,
            priority: Priority::Low,
            category: "shopping".to_string(),
            due_date: None,
            created_at: "2026-10-17T07:05:00Z".parse().unwrap(),
            completed_at: None,
        }
    }

    #[test]
    fn test_labels() {
        plain();
        assert_eq!(priority_label(Priority::Medium).to_string(), "[MEDIUM]");
        assert_eq!(category_label("work").to_string(), "[WORK]");
        assert_eq!(category_label("").to_string(), "[GENERAL]");

        let mut todo = sample("Buy milk");
        assert_eq!(status_label(&todo).to_string(), "[PENDING]");
        todo.completed = true;
        assert_eq!(status_label(&todo).to_string(), "[DONE]");
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short"), "short");
        let long = "a".repeat(40);
        let cut = truncate_title(&long);
        assert_eq!(cut.chars().count(), 35);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_format_due_date() {
        plain();
        let now = now();
        let utc = now.with_timezone(&Utc);

        assert_eq!(format_due_date(None, &now).to_string(), "No due date");
        assert_eq!(format_due_date(Some(utc), &now).to_string(), "TODAY");
        assert_eq!(format_due_date(Some(utc + Duration::days(1)), &now).to_string(), "TOMORROW");
        assert_eq!(format_due_date(Some(utc - Duration::days(1)), &now).to_string(), "OVERDUE");
        assert_eq!(format_due_date(Some(utc + Duration::days(5)), &now).to_string(), "Oct 23");
    }

    #[test]
    fn test_render_todos() {
        plain();
        let now = now();
        assert!(render_todos(&[], "All Todos", &now).starts_with("No todos found!"));

        let out = render_todos(&[sample("Buy milk")], "All Todos", &now);
        assert!(out.contains("All Todos"));
        assert!(out.contains("8a9b"));
        assert!(out.contains("[PENDING]"));
        assert!(out.contains("[SHOPPING]"));
        assert!(out.contains("Buy milk"));
        assert!(out.contains("Oct 17, 09:05"));
    }

    #[test]
    fn test_render_details_shows_completion() {
        plain();
        let now = now();
        let mut todo = sample("Buy milk");
        assert!(render_todo_details(&todo, &now).contains("Description: No description"));

        todo.completed = true;
        todo.completed_at = Some("2026-10-18T08:00:00Z".parse().unwrap());
        let out = render_todo_details(&todo, &now);
        assert!(out.contains("Status: [COMPLETED]"));
        assert!(out.contains("Completed: Oct 18, 10:00"));
    }

    #[test]
    fn test_render_stats() {
        plain();
        let stats = TodoStats {
            total: 4,
            completed: 3,
            pending: 1,
            overdue: 0,
            today: 2,
        };
        let out = render_stats(&stats);
        assert!(out.contains("Total Todos: 4"));
        assert!(out.contains("Due Today: 2"));
        assert!(out.contains("75%"));
        assert_eq!(completion_bar(50).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_render_todos_keeps_columns_aligned() {
        plain();
        let now = now();
        let mut done = sample("Walk dog");
        done.completed = true;
        done.priority = Priority::High;
        let out = render_todos(&[sample("Buy milk"), done], "All Todos", &now);
        let rows: Vec<&str> = out.lines().filter(|l| l.contains("8a9b")).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].find("Buy milk"), rows[1].find("Walk dog"));
        assert!(!out.contains('\x1b'));
    }
}
