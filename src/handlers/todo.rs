use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::text_slot;
use crate::kernel::dispatcher::{ActionHandler, HandlerError};
use crate::kernel::error::EngineError;
use crate::kernel::intent::ArgumentBundle;
use crate::kernel::time::Clock;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo list io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("todo list is not valid json: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<TodoError> for EngineError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::Io(e) => EngineError::Io(e),
            TodoError::Serialization(e) => EngineError::Config(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub item: String,
    /// Local time, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    pub completed: bool,
}

/// JSON-array-backed list. The whole list is rewritten on every change.
pub struct TodoStore {
    path: PathBuf,
    items: Vec<TodoItem>,
    clock: Arc<dyn Clock>,
}

impl TodoStore {
    /// Loads `path` if it exists; otherwise starts empty and creates the file
    /// (and its parent directory) on first write.
    pub fn open(path: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, TodoError> {
        let mut store = Self {
            path,
            items: Vec::new(),
            clock,
        };
        store.load()?;
        Ok(store)
    }

    pub fn load(&mut self) -> Result<(), TodoError> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&self.path)?;
        self.items = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)?
        };
        debug!(items = self.items.len(), "todo list loaded");
        Ok(())
    }

    pub fn save(&self) -> Result<(), TodoError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Appends and persists. Returns the new length.
    pub fn add(&mut self, item: &str) -> Result<usize, TodoError> {
        let timestamp = self.clock.now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.items.push(TodoItem {
            item: item.to_string(),
            timestamp,
            completed: false,
        });
        self.save()?;
        info!(total = self.items.len(), "todo item added");
        Ok(self.items.len())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn pending(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(|i| !i.completed)
    }
}

pub type SharedTodoStore = Arc<Mutex<TodoStore>>;

fn lock(store: &SharedTodoStore) -> Result<std::sync::MutexGuard<'_, TodoStore>, HandlerError> {
    store
        .lock()
        .map_err(|_| HandlerError::Failed("todo list lock poisoned".to_string()))
}

pub struct AddTodo {
    store: SharedTodoStore,
}

impl AddTodo {
    pub fn new(store: SharedTodoStore) -> Self {
        Self { store }
    }
}

impl ActionHandler for AddTodo {
    fn handle(&self, args: &ArgumentBundle) -> Result<String, HandlerError> {
        let item = text_slot(args, "item")?;
        lock(&self.store)?.add(item)?;
        Ok(format!("Added to your list: {}", item))
    }
}

pub struct ShowTodo {
    store: SharedTodoStore,
}

impl ShowTodo {
    pub fn new(store: SharedTodoStore) -> Self {
        Self { store }
    }
}

impl ActionHandler for ShowTodo {
    fn handle(&self, _args: &ArgumentBundle) -> Result<String, HandlerError> {
        let store = lock(&self.store)?;
        if store.items().is_empty() {
            return Ok("Your todo list is empty.".to_string());
        }

        let pending: Vec<&TodoItem> = store.pending().collect();
        if pending.is_empty() {
            return Ok("You've completed all items on your todo list. Congratulations!".to_string());
        }

        let mut reply = format!("You have {} items on your todo list:", pending.len());
        for (i, item) in pending.iter().enumerate() {
            reply.push_str(&format!(" Item {}: {}.", i + 1, item.item));
        }
        Ok(reply)
    }
}
