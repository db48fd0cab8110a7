//! Interactive input collection. Everything here validates locally and hands
//! plain request values to the caller; nothing touches the store.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::display;
use crate::error::InputError;
use crate::models::{NewTodoRequest, Priority, Todo, TodoFilter, UpdateTodoRequest, DEFAULT_CATEGORY};

pub const CATEGORIES: [&str; 7] = [
    "work",
    "personal",
    "shopping",
    "health",
    "education",
    "finance",
    DEFAULT_CATEGORY,
];

const PRIORITIES: [(Priority, &str); 3] = [
    (Priority::High, "High Priority"),
    (Priority::Medium, "Medium Priority"),
    (Priority::Low, "Low Priority"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    View,
    Add,
    Edit,
    Toggle,
    Delete,
    Stats,
    Search,
    Categories,
    Exit,
}

impl MenuChoice {
    pub const MENU_ORDER: [(MenuChoice, &'static str); 9] = [
        (MenuChoice::View, "View Todos"),
        (MenuChoice::Add, "Add Todo"),
        (MenuChoice::Edit, "Edit Todo"),
        (MenuChoice::Toggle, "Toggle Todo"),
        (MenuChoice::Delete, "Delete Todo"),
        (MenuChoice::Stats, "Statistics"),
        (MenuChoice::Search, "Search Todos"),
        (MenuChoice::Categories, "Manage Categories"),
        (MenuChoice::Exit, "Exit"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChoice {
    Filter(TodoFilter),
    Category,
    Back,
}

pub fn parse_title(input: &str) -> Result<String, String> {
    let title = input.trim();
    if title.is_empty() {
        return Err("Title is required!".to_string());
    }
    Ok(title.to_string())
}

/// `YYYY-MM-DD` as the first instant of that day in `tz`: midnight, or the
/// first whole hour after it when a DST change skips midnight.
pub fn parse_due_date<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| "Invalid date format! Use YYYY-MM-DD".to_string())?;
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| "Date does not exist in the local time zone".to_string())
}

pub fn parse_new_due_date<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>, String> {
    let due = parse_due_date(input, &now.timezone())?;
    if due.with_timezone(&now.timezone()).date_naive() < now.date_naive() {
        return Err("Due date cannot be in the past!".to_string());
    }
    Ok(due)
}

fn parse_optional_due_date(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_due_date(input, &Local).map(Some)
    }
}

/// Raw widgets the prompt flows are built from. `None` from `select` or
/// `confirm` means the user backed out (Esc).
pub trait Terminal {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, InputError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, InputError>;

    /// Re-asks until `validate` accepts the answer.
    fn text(
        &mut self,
        prompt: &str,
        initial: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> Result<String, InputError>;
}

pub struct DialoguerTerminal {
    theme: ColorfulTheme,
}

impl DialoguerTerminal {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for DialoguerTerminal {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>, InputError> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(selection)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, InputError> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()?;
        Ok(confirmed)
    }

    fn text(
        &mut self,
        prompt: &str,
        initial: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> Result<String, InputError> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> { validate(input.as_str()) })
            .interact_text()?;
        Ok(value)
    }
}

pub struct Prompt<T> {
    terminal: T,
}

impl<T: Terminal> Prompt<T> {
    pub fn new(terminal: T) -> Self {
        Self { terminal }
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize, InputError> {
        self.terminal
            .select(prompt, items, default)?
            .ok_or(InputError::Cancelled)
    }

    fn text(
        &mut self,
        prompt: &str,
        initial: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> Result<String, InputError> {
        self.terminal.text(prompt, initial, validate)
    }

    pub fn main_menu_choice(&mut self) -> Result<MenuChoice, InputError> {
        let items: Vec<String> = MenuChoice::MENU_ORDER
            .iter()
            .map(|(_, label)| label.to_string())
            .collect();
        let index = self.select("What would you like to do?", &items, 0)?;
        Ok(MenuChoice::MENU_ORDER[index].0)
    }

    pub fn view_choice(&mut self) -> Result<ViewChoice, InputError> {
        let mut items: Vec<String> = TodoFilter::MENU_ORDER
            .iter()
            .map(|filter| filter.title().to_string())
            .collect();
        items.push("By Category".to_string());
        items.push("Back to Main Menu".to_string());

        let choice = match self.terminal.select("How would you like to filter your todos?", &items, 0)? {
            Some(i) if i < TodoFilter::MENU_ORDER.len() => ViewChoice::Filter(TodoFilter::MENU_ORDER[i]),
            Some(i) if i == TodoFilter::MENU_ORDER.len() => ViewChoice::Category,
            _ => ViewChoice::Back,
        };
        Ok(choice)
    }

    pub fn new_todo(&mut self) -> Result<NewTodoRequest, InputError> {
        let title = self.text("What do you need to do?", "", &|s| parse_title(s).map(|_| ()))?;
        let description = self.text("Add a description (optional):", "", &|_| Ok(()))?;
        let priority = self.priority("Set priority:", Priority::Medium)?;
        let category = self.category("Choose category:", DEFAULT_CATEGORY)?;

        let due_date = if self.confirm("Set a due date?")? {
            let now = Local::now();
            let raw = self.text("Enter due date (YYYY-MM-DD):", "", &|s| {
                parse_new_due_date(s, &now).map(|_| ())
            })?;
            Some(parse_new_due_date(&raw, &now).map_err(InputError::Invalid)?)
        } else {
            None
        };

        Ok(NewTodoRequest {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            priority,
            category,
            due_date,
        })
    }

    /// Only fields that differ from `todo` end up in the request.
    pub fn edit_todo(&mut self, todo: &Todo) -> Result<UpdateTodoRequest, InputError> {
        let mut update = UpdateTodoRequest::default();

        let title = self.text("Update title:", &todo.title, &|s| parse_title(s).map(|_| ()))?;
        let title = title.trim();
        if title != todo.title {
            update.title = Some(title.to_string());
        }

        let description = self.text("Update description:", &todo.description, &|_| Ok(()))?;
        let description = description.trim();
        if description != todo.description {
            update.description = Some(description.to_string());
        }

        let priority = self.priority("Update priority:", todo.priority)?;
        if priority != todo.priority {
            update.priority = Some(priority);
        }

        let category = self.category("Update category:", &todo.category)?;
        if category != todo.category {
            update.category = Some(category);
        }

        if self.confirm("Update due date?")? {
            let initial = todo
                .due_date
                .map(|due| due.with_timezone(&Local).format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let raw = self.text(
                "Enter new due date (YYYY-MM-DD) or leave empty to remove:",
                &initial,
                &|s| parse_optional_due_date(s).map(|_| ()),
            )?;
            update.due_date = Some(parse_optional_due_date(&raw).map_err(InputError::Invalid)?);
        }

        Ok(update)
    }

    fn priority(&mut self, prompt: &str, current: Priority) -> Result<Priority, InputError> {
        let items: Vec<String> = PRIORITIES.iter().map(|(_, label)| label.to_string()).collect();
        let default = PRIORITIES
            .iter()
            .position(|(p, _)| *p == current)
            .unwrap_or(1);
        let index = self.select(prompt, &items, default)?;
        Ok(PRIORITIES[index].0)
    }

    // A category outside the fixed list stays selectable so editing can keep it.
    fn category(&mut self, prompt: &str, current: &str) -> Result<String, InputError> {
        let mut items: Vec<String> = CATEGORIES.iter().map(|c| c.to_string()).collect();
        if !items.iter().any(|c| c == current) {
            items.push(current.to_string());
        }
        let default = items.iter().position(|c| c == current).unwrap_or(0);
        let labels: Vec<String> = items
            .iter()
            .map(|c| display::category_label(c).to_string())
            .collect();

        let index = self.select(prompt, &labels, default)?;
        Ok(items[index].clone())
    }

    /// `None` when the user picks "Back".
    pub fn select_todo(
        &mut self,
        todos: &[Todo],
        message: &str,
    ) -> Result<Option<String>, InputError> {
        let mut items: Vec<String> = todos
            .iter()
            .map(|todo| {
                format!(
                    "{} {} {} {}",
                    display::status_label(todo),
                    display::priority_label(todo.priority),
                    display::category_label(&todo.category),
                    display::truncate_title(&todo.title),
                )
            })
            .collect();
        items.push("Back to Main Menu".to_string());

        let selected = self
            .terminal
            .select(message, &items, 0)?
            .and_then(|i| todos.get(i))
            .map(|todo| todo.id.clone());
        Ok(selected)
    }

    pub fn select_category(&mut self, categories: &[String]) -> Result<Option<String>, InputError> {
        let mut items: Vec<String> = categories
            .iter()
            .map(|c| display::category_label(c).to_string())
            .collect();
        items.push("Back to Filters".to_string());

        let selected = self
            .terminal
            .select("Select category:", &items, 0)?
            .and_then(|i| categories.get(i))
            .cloned();
        Ok(selected)
    }

    pub fn search_query(&mut self) -> Result<String, InputError> {
        let query = self.text("Search todos:", "", &|s| {
            if s.trim().is_empty() {
                Err("Search term is required!".to_string())
            } else {
                Ok(())
            }
        })?;
        Ok(query.trim().to_string())
    }

    /// Backing out of a confirmation counts as "no".
    pub fn confirm(&mut self, message: &str) -> Result<bool, InputError> {
        Ok(self.terminal.confirm(message, false)?.unwrap_or(false))
    }
}
