use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Todo, TodoFilter, TodoStats};

/// Due date falls on the same calendar day as `now`, in `now`'s time zone.
pub fn is_due_today<Tz: TimeZone>(todo: &Todo, now: &DateTime<Tz>) -> bool {
    todo.due_date
        .is_some_and(|due| due.with_timezone(&now.timezone()).date_naive() == now.date_naive())
}

pub fn is_due_tomorrow<Tz: TimeZone>(todo: &Todo, now: &DateTime<Tz>) -> bool {
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return false;
    };
    todo.due_date
        .is_some_and(|due| due.with_timezone(&now.timezone()).date_naive() == tomorrow)
}

/// Pending with a due instant strictly before `now`.
pub fn is_overdue<Tz: TimeZone>(todo: &Todo, now: &DateTime<Tz>) -> bool {
    let now = now.with_timezone(&Utc);
    !todo.completed && todo.due_date.is_some_and(|due| due < now)
}

pub fn matches_filter<Tz: TimeZone>(todo: &Todo, filter: TodoFilter, now: &DateTime<Tz>) -> bool {
    match filter {
        TodoFilter::All => true,
        TodoFilter::Completed => todo.completed,
        TodoFilter::Pending => !todo.completed,
        TodoFilter::Today => is_due_today(todo, now),
        TodoFilter::Tomorrow => is_due_tomorrow(todo, now),
        TodoFilter::Overdue => is_overdue(todo, now),
    }
}

/// Case-insensitive substring match on title, description or category.
pub fn matches_query(todo: &Todo, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    todo.title.to_lowercase().contains(&needle)
        || todo.description.to_lowercase().contains(&needle)
        || todo.category.to_lowercase().contains(&needle)
}

pub fn collect_stats<Tz: TimeZone>(todos: &[Todo], now: &DateTime<Tz>) -> TodoStats {
    let mut stats = TodoStats::default();
    for todo in todos {
        stats.total += 1;
        if todo.completed {
            stats.completed += 1;
        } else {
            stats.pending += 1;
        }
        if is_overdue(todo, now) {
            stats.overdue += 1;
        }
        if is_due_today(todo, now) {
            stats.today += 1;
        }
    }
    stats
}
