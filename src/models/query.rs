use std::fmt;

use serde::{Deserialize, Serialize};

/// Named subset of the collection returned by a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    Pending,
    Today,
    Tomorrow,
    Overdue,
}

impl TodoFilter {
    /// Order the filters are offered in.
    pub const MENU_ORDER: [TodoFilter; 6] = [
        TodoFilter::All,
        TodoFilter::Pending,
        TodoFilter::Completed,
        TodoFilter::Today,
        TodoFilter::Tomorrow,
        TodoFilter::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Completed => "completed",
            TodoFilter::Pending => "pending",
            TodoFilter::Today => "today",
            TodoFilter::Tomorrow => "tomorrow",
            TodoFilter::Overdue => "overdue",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TodoFilter::All => "All Todos",
            TodoFilter::Completed => "Completed Todos",
            TodoFilter::Pending => "Pending Todos",
            TodoFilter::Today => "Due Today",
            TodoFilter::Tomorrow => "Due Tomorrow",
            TodoFilter::Overdue => "Overdue Todos",
        }
    }
}

/// Unrecognized names fall back to `All`.
impl From<&str> for TodoFilter {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "completed" => TodoFilter::Completed,
            "pending" => TodoFilter::Pending,
            "today" => TodoFilter::Today,
            "tomorrow" => TodoFilter::Tomorrow,
            "overdue" => TodoFilter::Overdue,
            _ => TodoFilter::All,
        }
    }
}

impl fmt::Display for TodoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub today: usize,
}

impl TodoStats {
    /// Completed share of the total as a rounded percentage.
    pub fn completion_rate(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_str() {
        assert_eq!(TodoFilter::from("Overdue"), TodoFilter::Overdue);
        assert_eq!(TodoFilter::from("tomorrow"), TodoFilter::Tomorrow);
        assert_eq!(TodoFilter::from("someday"), TodoFilter::All);
        assert_eq!(TodoFilter::from(""), TodoFilter::All);

        for filter in TodoFilter::MENU_ORDER {
            assert_eq!(TodoFilter::from(filter.as_str()), filter);
        }
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(TodoStats::default().completion_rate(), 0);

        let stats = TodoStats {
            total: 3,
            completed: 2,
            pending: 1,
            ..TodoStats::default()
        };
        assert_eq!(stats.completion_rate(), 67);
    }
}
