//! To-do list backed by a remote REST service.
//!
//! Each remote operation (fetch, add, update, delete) is a small state
//! machine: an intent action marks the list as loading and starts one
//! network call, and exactly one completion action (success or failure)
//! applies the result. The calls themselves live in the effect coordinator,
//! so the reducer stays pure and testable.
//!
//! - [`types`]: records, list state and the action enum
//! - [`api`]: the [`TodoApi`] seam and its `reqwest` implementation
//! - [`effects`]: the coordinator turning intents into calls
//! - [`reducer`]: state transitions
//! - [`presentation`]: gesture handling and text rendering
//!
//! # Quick Start
//!
//! ```no_run
//! use saga_todo::{HttpTodoApi, TodoAction, TodoEnvironment, TodoListState, TodoReducer, TodoStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(HttpTodoApi::new("https://jsonplaceholder.typicode.com"));
//! let store = TodoStore::new(TodoListState::new(), TodoReducer::new(), TodoEnvironment::new(api));
//!
//! let mut handle = store.send(TodoAction::FetchRequest).await?;
//! handle.wait().await;
//!
//! let titles = store.state(|s| s.todos.iter().map(|t| t.title.clone()).collect::<Vec<_>>()).await;
//! println!("{titles:?}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod effects;
pub mod error;
pub mod mocks;
pub mod presentation;
pub mod reducer;
pub mod types;

use saga_todo_runtime::Store;

// Re-export commonly used types
pub use api::{HttpTodoApi, TodoApi};
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use presentation::{render, TodoListController};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Todo, TodoAction, TodoDraft, TodoId, TodoListState};

/// Store running the to-do reducer against the service client `A`
pub type TodoStore<A> = Store<TodoListState, TodoAction, TodoEnvironment<A>, TodoReducer<A>>;
