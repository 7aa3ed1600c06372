//! Domain types for the to-do list.
//!
//! The list is a local cache of records owned by a remote service. Every
//! change goes through a request action, a network call, and a completion
//! action carrying either the server's answer or an error message.

use saga_todo_macros::Action;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a to-do record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw server id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A to-do record as stored by the remote service
///
/// Unknown JSON fields (such as `userId`) are ignored when decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Server-assigned identifier
    pub id: TodoId,
    /// Free text
    pub title: String,
    /// Whether the task is done
    pub completed: bool,
}

impl Todo {
    /// Creates a record
    #[must_use]
    pub fn new(id: TodoId, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
        }
    }

    /// Returns a copy of this record with a different title
    #[must_use]
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }
}

/// A record that has not been created yet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    /// Free text
    pub title: String,
    /// Whether the task is done
    pub completed: bool,
}

impl TodoDraft {
    /// Creates an uncompleted draft
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// Client-side state of the list
///
/// `loading` is a single flag shared by all operations: any request sets
/// it and any completion clears it, even if other requests are still in
/// flight. `error` holds the message of the most recent failure until the
/// next success clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
    /// Records in display order
    pub todos: Vec<Todo>,
    /// True while an operation is in flight
    pub loading: bool,
    /// Message of the last failure
    pub error: Option<String>,
}

impl TodoListState {
    /// Creates the initial state: empty, idle, no error
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Returns the record with the given id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Returns the number of records
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }
}

/// Actions for the to-do list
///
/// Each operation family has one intent and two completions. Completions
/// are only ever produced by effects.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Fetch ==========
    /// Load the list from the server
    #[intent]
    FetchRequest,

    /// The server returned the list (already truncated)
    #[success]
    FetchSuccess(Vec<Todo>),

    /// Loading the list failed
    #[failure]
    FetchFailure(String),

    // ========== Add ==========
    /// Create a record on the server
    #[intent]
    AddRequest(TodoDraft),

    /// The server created the record
    #[success]
    AddSuccess(Todo),

    /// Creating the record failed
    #[failure]
    AddFailure(String),

    // ========== Update ==========
    /// Replace a record on the server
    #[intent]
    UpdateRequest(Todo),

    /// The server stored the record
    #[success]
    UpdateSuccess(Todo),

    /// Replacing the record failed
    #[failure]
    UpdateFailure(String),

    // ========== Delete ==========
    /// Remove a record on the server
    #[intent]
    DeleteRequest(TodoId),

    /// The server removed the record
    #[success]
    DeleteSuccess(TodoId),

    /// Removing the record failed
    #[failure]
    DeleteFailure(String),
}

impl TodoAction {
    /// Returns true if `self` is the success or failure that answers `intent`
    ///
    /// Only the operation family is compared, not the payload.
    #[must_use]
    pub const fn is_completion_of(&self, intent: &Self) -> bool {
        matches!(
            (intent, self),
            (Self::FetchRequest, Self::FetchSuccess(_) | Self::FetchFailure(_))
                | (Self::AddRequest(_), Self::AddSuccess(_) | Self::AddFailure(_))
                | (Self::UpdateRequest(_), Self::UpdateSuccess(_) | Self::UpdateFailure(_))
                | (Self::DeleteRequest(_), Self::DeleteSuccess(_) | Self::DeleteFailure(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_decodes_ignoring_extra_fields() -> Result<(), serde_json::Error> {
        let json = r#"{"userId": 1, "id": 3, "title": "fugiat veniam minus", "completed": false}"#;
        let todo: Todo = serde_json::from_str(json)?;

        assert_eq!(todo, Todo::new(TodoId::new(3), "fugiat veniam minus", false));
        Ok(())
    }

    #[test]
    fn test_todo_id_is_a_bare_number_on_the_wire() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(Todo::new(TodoId::new(201), "Buy milk", true))?;

        assert_eq!(
            json,
            serde_json::json!({"id": 201, "title": "Buy milk", "completed": true})
        );
        Ok(())
    }

    #[test]
    fn test_draft_has_no_id() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(TodoDraft::new("Buy milk"))?;

        assert_eq!(json, serde_json::json!({"title": "Buy milk", "completed": false}));
        Ok(())
    }

    #[test]
    fn test_initial_state() {
        let state = TodoListState::new();

        assert!(state.todos.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state, TodoListState::default());
    }

    #[test]
    fn test_with_title_keeps_id_and_completion() {
        let todo = Todo::new(TodoId::new(1), "old", true);
        let renamed = todo.with_title("new");

        assert_eq!(renamed.id, todo.id);
        assert!(renamed.completed);
        assert_eq!(renamed.title, "new");
    }

    #[test]
    fn test_action_classification() {
        assert!(TodoAction::FetchRequest.is_intent());
        assert!(TodoAction::AddSuccess(Todo::new(TodoId::new(1), "a", false)).is_completion());
        assert!(TodoAction::DeleteFailure("boom".to_string()).is_failure());
        assert_eq!(TodoAction::DeleteRequest(TodoId::new(1)).name(), "DeleteRequest");
    }

    #[test]
    fn test_completion_of_matches_family_only() {
        let add = TodoAction::AddRequest(TodoDraft::new("a"));
        let added = TodoAction::AddSuccess(Todo::new(TodoId::new(1), "a", false));

        assert!(added.is_completion_of(&add));
        assert!(TodoAction::AddFailure("boom".to_string()).is_completion_of(&add));
        assert!(!TodoAction::FetchFailure("boom".to_string()).is_completion_of(&add));
        assert!(!TodoAction::DeleteSuccess(TodoId::new(1)).is_completion_of(&TodoAction::FetchRequest));
        assert!(!add.is_completion_of(&add));
    }
}
