use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::db::TodoStore;
use crate::display;
use crate::error::{AppError, InputError};
use crate::prompt::{MenuChoice, Prompt, Terminal, ViewChoice};

pub struct App<T> {
    store: TodoStore,
    prompt: Prompt<T>,
    running: bool,
}

impl<T: Terminal> App<T> {
    pub fn new(store: TodoStore, prompt: Prompt<T>) -> Self {
        Self {
            store,
            prompt,
            running: true,
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Runs the menu until the user exits or backs out of it.
    pub async fn run(&mut self) -> Result<(), AppError> {
        self.store.initialize().await?;
        info!("using todo file {}", self.store.path().display());

        while self.running {
            let choice = match self.prompt.main_menu_choice() {
                Ok(choice) => choice,
                Err(InputError::Cancelled) => break,
                Err(e) => return Err(e.into()),
            };
            debug!("menu choice {:?}", choice);

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(AppError::Input(InputError::Cancelled)) => {
                    display::show_info("Action cancelled.");
                }
                Err(e) => {
                    warn!("{:?} failed: {}", choice, e);
                    display::show_error(&e.to_string());
                }
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<(), AppError> {
        match choice {
            MenuChoice::View => self.view_todos().await,
            MenuChoice::Add => self.add_todo().await,
            MenuChoice::Edit => self.edit_todo().await,
            MenuChoice::Toggle => self.toggle_todo().await,
            MenuChoice::Delete => self.delete_todo().await,
            MenuChoice::Stats => self.show_stats().await,
            MenuChoice::Search => self.search_todos().await,
            MenuChoice::Categories => self.show_categories().await,
            MenuChoice::Exit => self.exit().await,
        }
    }

    async fn view_todos(&mut self) -> Result<(), AppError> {
        match self.prompt.view_choice()? {
            ViewChoice::Back => {}
            ViewChoice::Filter(filter) => {
                let todos = self.store.list_todos(filter).await;
                display::show_todos(&todos, filter.title());
            }
            ViewChoice::Category => {
                let categories = self.categories().await;
                if categories.is_empty() {
                    display::show_info("No categories found. Create some todos first!");
                    return Ok(());
                }
                let Some(category) = self.prompt.select_category(&categories)? else {
                    return Ok(());
                };
                let todos = self.store.fetch_todos_by_category(&category).await;
                display::show_todos(&todos, &format!("{} Todos", capitalize(&category)));
            }
        }
        Ok(())
    }

    async fn add_todo(&mut self) -> Result<(), AppError> {
        display::show_info("Create a new todo");
        let req = self.prompt.new_todo()?;
        let todo = self.store.insert_todo(req).await?;
        info!(id = %todo.id, "todo created");

        display::show_success(&format!("Todo \"{}\" created successfully!", todo.title));
        display::show_todo_details(&todo);
        Ok(())
    }

    async fn edit_todo(&mut self) -> Result<(), AppError> {
        let Some(id) = self.pick_todo("edit").await? else {
            return Ok(());
        };
        let Some(todo) = self.store.find_todo_by_id(&id).await else {
            display::show_error("Todo not found!");
            return Ok(());
        };

        display::show_todo_details(&todo);
        let update = self.prompt.edit_todo(&todo)?;
        if update.is_empty() {
            display::show_info("Nothing changed.");
            return Ok(());
        }

        let updated = self.store.update_todo(&id, update).await?;
        info!(id = %updated.id, "todo updated");
        display::show_success("Todo updated successfully!");
        display::show_todo_details(&updated);
        Ok(())
    }

    async fn toggle_todo(&mut self) -> Result<(), AppError> {
        let Some(id) = self.pick_todo("toggle").await? else {
            return Ok(());
        };
        let Some(todo) = self.store.find_todo_by_id(&id).await else {
            display::show_error("Todo not found!");
            return Ok(());
        };

        let action = if todo.completed { "mark as pending" } else { "mark as completed" };
        let question = format!("Are you sure you want to {}: \"{}\"?", action, todo.title);
        if !self.prompt.confirm(&question)? {
            display::show_info("Action cancelled.");
            return Ok(());
        }

        let toggled = self.store.toggle_todo(&id).await?;
        info!(id = %toggled.id, completed = toggled.completed, "todo toggled");
        if toggled.completed {
            display::show_success(&format!("Todo \"{}\" marked as completed!", toggled.title));
        } else {
            display::show_success(&format!("Todo \"{}\" marked as pending.", toggled.title));
        }
        Ok(())
    }

    async fn delete_todo(&mut self) -> Result<(), AppError> {
        let Some(id) = self.pick_todo("delete").await? else {
            return Ok(());
        };
        let Some(todo) = self.store.find_todo_by_id(&id).await else {
            display::show_error("Todo not found!");
            return Ok(());
        };

        display::show_todo_details(&todo);
        let question = format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            todo.title
        );
        if !self.prompt.confirm(&question)? {
            display::show_info("Delete cancelled.");
            return Ok(());
        }

        self.store.delete_todo(&id).await?;
        info!(id = %id, "todo deleted");
        display::show_success(&format!("Todo \"{}\" deleted successfully!", todo.title));
        Ok(())
    }

    async fn show_stats(&mut self) -> Result<(), AppError> {
        let stats = self.store.fetch_stats().await;
        display::show_stats(&stats);
        Ok(())
    }

    async fn search_todos(&mut self) -> Result<(), AppError> {
        let query = self.prompt.search_query()?;
        let todos = self.store.search_todos(&query).await;
        display::show_todos(&todos, &format!("Search Results for \"{}\"", query));
        Ok(())
    }

    async fn show_categories(&mut self) -> Result<(), AppError> {
        let categories: BTreeSet<String> = self.store.fetch_categories().await;
        if categories.is_empty() {
            display::show_info(
                "No categories found. Categories are created automatically when you add todos.",
            );
        } else {
            print!("{}", display::render_categories(&categories));
        }
        Ok(())
    }

    async fn exit(&mut self) -> Result<(), AppError> {
        if self.prompt.confirm("Are you sure you want to exit?")? {
            println!("Thank you for using Karma! Stay productive!");
            self.running = false;
        }
        Ok(())
    }

    async fn pick_todo(&mut self, verb: &str) -> Result<Option<String>, AppError> {
        let todos = self.store.fetch_todos().await;
        if todos.is_empty() {
            display::show_info(&format!("No todos to {}. Create some todos first!", verb));
            return Ok(None);
        }
        let id = self
            .prompt
            .select_todo(&todos, &format!("Select todo to {}:", verb))?;
        Ok(id)
    }

    async fn categories(&self) -> Vec<String> {
        self.store.fetch_categories().await.into_iter().collect()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
