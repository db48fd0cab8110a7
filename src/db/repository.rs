use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::Config;
use crate::db::filter::{collect_stats, matches_filter, matches_query};
use crate::error::StoreError;
use crate::models::todo::normalize_category;
use crate::models::{NewTodoRequest, Todo, TodoFilter, TodoStats, UpdateTodoRequest};

/// JSON-document backed todo collection.
///
/// Every mutation reads the whole document, changes it in memory and writes it
/// back in full. The internal lock serializes those cycles within one process;
/// nothing guards against a second process sharing the same file.
pub struct TodoStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.todo_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the data directory and an empty document if none exists yet.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }
        if !fs::try_exists(&self.path).await? {
            self.save_todos(&[]).await?;
        }
        Ok(())
    }

    /// Full collection in stored order. A missing or unreadable document
    /// yields an empty collection.
    pub async fn fetch_todos(&self) -> Vec<Todo> {
        let _guard = self.lock.lock().await;
        self.load_todos().await
    }

    pub async fn list_todos(&self, filter: TodoFilter) -> Vec<Todo> {
        self.list_todos_at(filter, &Local::now()).await
    }

    pub async fn list_todos_at<Tz: TimeZone>(
        &self,
        filter: TodoFilter,
        now: &DateTime<Tz>,
    ) -> Vec<Todo> {
        self.fetch_todos()
            .await
            .into_iter()
            .filter(|todo| matches_filter(todo, filter, now))
            .collect()
    }

    pub async fn fetch_todos_by_category(&self, category: &str) -> Vec<Todo> {
        self.fetch_todos()
            .await
            .into_iter()
            .filter(|todo| todo.category == category)
            .collect()
    }

    pub async fn search_todos(&self, query: &str) -> Vec<Todo> {
        self.fetch_todos()
            .await
            .into_iter()
            .filter(|todo| matches_query(todo, query))
            .collect()
    }

    pub async fn find_todo_by_id(&self, id: &str) -> Option<Todo> {
        self.fetch_todos().await.into_iter().find(|todo| todo.id == id)
    }

    pub async fn insert_todo(&self, req: NewTodoRequest) -> Result<Todo, StoreError> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::Validation("title must not be empty".to_string()));
        }

        let _guard = self.lock.lock().await;
        let mut todos = self.load_todos().await;

        let todo = Todo {
            id: self.generate_id(&todos),
            title,
            description: req.description.trim().to_string(),
            completed: false,
            priority: req.priority,
            category: normalize_category(&req.category),
            due_date: req.due_date,
            created_at: Utc::now(),
            completed_at: None,
        };

        todos.push(todo.clone());
        self.save_todos(&todos).await?;

        Ok(todo)
    }

    pub async fn toggle_todo(&self, id: &str) -> Result<Todo, StoreError> {
        let _guard = self.lock.lock().await;
        let mut todos = self.load_todos().await;

        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        todo.completed = !todo.completed;
        todo.completed_at = if todo.completed { Some(Utc::now()) } else { None };
        let toggled = todo.clone();

        self.save_todos(&todos).await?;
        Ok(toggled)
    }

    pub async fn update_todo(&self, id: &str, req: UpdateTodoRequest) -> Result<Todo, StoreError> {
        if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(StoreError::Validation("title must not be empty".to_string()));
        }

        let _guard = self.lock.lock().await;
        let mut todos = self.load_todos().await;

        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        req.apply(todo);
        let updated = todo.clone();

        self.save_todos(&todos).await?;
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut todos = self.load_todos().await;

        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        if todos.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.save_todos(&todos).await
    }

    /// Distinct non-empty categories.
    pub async fn fetch_categories(&self) -> BTreeSet<String> {
        self.fetch_todos()
            .await
            .into_iter()
            .map(|todo| todo.category)
            .filter(|category| !category.is_empty())
            .collect()
    }

    pub async fn fetch_stats(&self) -> TodoStats {
        self.fetch_stats_at(&Local::now()).await
    }

    pub async fn fetch_stats_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TodoStats {
        collect_stats(&self.fetch_todos().await, now)
    }

    async fn load_todos(&self) -> Vec<Todo> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    // Write to a sibling file then rename, so readers only ever see a whole document.
    async fn save_todos(&self, todos: &[Todo]) -> Result<(), StoreError> {
        let mut body = serde_json::to_vec_pretty(todos)?;
        body.push(b'\n');

        let tmp = self.tmp_path();
        let written: std::io::Result<()> = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&body).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn generate_id(&self, todos: &[Todo]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !todos.iter().any(|todo| todo.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmp_path_is_sibling() {
        let store = TodoStore::new("data/todos.json");
        assert_eq!(store.tmp_path(), PathBuf::from("data/todos.json.tmp"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = TodoStore::new(dir.path().join("nothing-here.json"));

        assert!(store.fetch_todos().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("todos.json");
        fs::write(&path, b"{ not json").await.expect("Failed to write file");

        let store = TodoStore::new(&path);
        assert!(store.fetch_todos().await.is_empty());
        assert_eq!(store.fetch_stats().await, TodoStats::default());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("todos.json");
        fs::create_dir(&path).await.expect("Failed to create dir");
        fs::write(path.join("keep"), b"x").await.expect("Failed to write file");

        let store = TodoStore::new(&path);
        let err = store
            .insert_todo(NewTodoRequest::new("Water plants"))
            .await
            .expect_err("Save over a directory should fail");

        assert!(err.is_storage());
        assert!(!fs::try_exists(store.tmp_path()).await.expect("Failed to stat"));
        assert!(fs::try_exists(path.join("keep")).await.expect("Failed to stat"));
    }

    #[tokio::test]
    async fn test_save_writes_pretty_array() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = TodoStore::new(dir.path().join("todos.json"));
        store.initialize().await.expect("Failed to initialize");

        store
            .insert_todo(NewTodoRequest::new("Water plants"))
            .await
            .expect("Failed to insert todo");

        let text = fs::read_to_string(store.path()).await.expect("Failed to read file");
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"dueDate\": null"));
        assert!(text.contains("\"completedAt\": null"));
        assert!(!fs::try_exists(store.tmp_path()).await.unwrap());
    }
}
