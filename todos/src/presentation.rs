//! Presentation layer.
//!
//! [`TodoListController`] holds the view-local state (the input text and
//! the record being edited) and turns user gestures into intents. It never
//! touches the list directly; the list is only read back from the store.

use crate::api::TodoApi;
use crate::types::{Todo, TodoAction, TodoDraft, TodoId, TodoListState};
use crate::TodoStore;
use saga_todo_runtime::{EffectHandle, StoreError};
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

/// Label of the submit button while editing
pub const UPDATE_LABEL: &str = "Update Todo";

/// Label of the submit button otherwise
pub const ADD_LABEL: &str = "Add Todo";

/// Renders the list as text lines
///
/// A `Loading...` line while an operation is in flight, an `Error: ...`
/// line when the last operation failed, then one line per record.
#[must_use]
pub fn render(state: &TodoListState) -> Vec<String> {
    let mut lines = Vec::with_capacity(state.todos.len() + 2);

    if state.loading {
        lines.push("Loading...".to_string());
    }

    if let Some(error) = &state.error {
        lines.push(format!("Error: {error}"));
    }

    lines.extend(state.todos.iter().map(|todo| {
        let mark = if todo.completed { 'x' } else { ' ' };
        format!("[{mark}] {}", todo.title)
    }));

    lines
}

/// Drives a [`TodoStore`] from user gestures
///
/// Methods that may emit an intent return the store's [`EffectHandle`], or
/// `None` when the gesture was ignored.
pub struct TodoListController<A>
where
    A: TodoApi + 'static,
{
    store: TodoStore<A>,
    input: String,
    editing: Option<Todo>,
    mounted: bool,
}

impl<A> TodoListController<A>
where
    A: TodoApi + 'static,
{
    /// Creates a controller with empty input and nothing selected
    #[must_use]
    pub const fn new(store: TodoStore<A>) -> Self {
        Self {
            store,
            input: String::new(),
            editing: None,
            mounted: false,
        }
    }

    /// The store this controller sends to
    #[must_use]
    pub const fn store(&self) -> &TodoStore<A> {
        &self.store
    }

    /// Current input text
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Record being edited, if any
    #[must_use]
    pub const fn editing(&self) -> Option<&Todo> {
        self.editing.as_ref()
    }

    /// Label for the submit button
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            UPDATE_LABEL
        } else {
            ADD_LABEL
        }
    }

    /// First display: load the list
    ///
    /// Only the first call emits `FetchRequest`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn mount(&mut self) -> Result<Option<EffectHandle>, StoreError> {
        if self.mounted {
            return Ok(None);
        }
        self.mounted = true;

        self.dispatch(TodoAction::FetchRequest).await.map(Some)
    }

    /// Replace the input text
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Select a record for editing and copy its title into the input
    pub fn begin_edit(&mut self, todo: &Todo) {
        self.input.clone_from(&todo.title);
        self.editing = Some(todo.clone());
    }

    /// Leave edit mode, clearing input and selection
    pub fn cancel_edit(&mut self) {
        self.input.clear();
        self.editing = None;
    }

    /// Submit the input
    ///
    /// Blank input (empty or whitespace only) is ignored and leaves the
    /// controller unchanged. Otherwise, when editing, the selected record is
    /// sent with the input as its new title and edit mode ends; when not
    /// editing, a new uncompleted record is requested. The input is sent
    /// as typed, without trimming, and cleared afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn submit(&mut self) -> Result<Option<EffectHandle>, StoreError> {
        let Some(action) = self.take_submission() else {
            return Ok(None);
        };

        self.dispatch(action).await.map(Some)
    }

    /// Submit the input and wait until its completion has been applied
    ///
    /// Same rules as [`submit`](Self::submit). Returns the `AddSuccess`,
    /// `AddFailure`, `UpdateSuccess` or `UpdateFailure` that answered the
    /// request, so callers can tell what the service actually stored.
    /// `Ok(None)` means the input was blank.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down, or [`StoreError::Timeout`] if no completion was applied within
    /// `timeout`.
    pub async fn submit_and_wait(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<TodoAction>, StoreError> {
        let Some(intent) = self.take_submission() else {
            return Ok(None);
        };

        // Subscribe first: the completion is broadcast before it is reduced
        let mut completions = self.store.subscribe_actions();
        let mut handle = self.dispatch(intent.clone()).await?;
        handle.wait_with_timeout(timeout).await?;

        loop {
            match completions.try_recv() {
                Ok(action) if action.is_completion_of(&intent) => return Ok(Some(action)),
                Ok(_) | Err(TryRecvError::Lagged(_)) => {},
                Err(TryRecvError::Empty) => return Err(StoreError::Timeout),
                Err(TryRecvError::Closed) => return Err(StoreError::ChannelClosed),
            }
        }
    }

    /// Turn the input into an intent, clearing input and selection
    ///
    /// Blank input yields nothing and leaves the controller unchanged.
    fn take_submission(&mut self) -> Option<TodoAction> {
        if self.input.trim().is_empty() {
            tracing::debug!("Ignoring submit with blank input");
            return None;
        }

        let title = std::mem::take(&mut self.input);
        Some(match self.editing.take() {
            Some(selected) => TodoAction::UpdateRequest(selected.with_title(title)),
            None => TodoAction::AddRequest(TodoDraft::new(title)),
        })
    }

    /// Request deletion of a record
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn delete(&mut self, id: TodoId) -> Result<Option<EffectHandle>, StoreError> {
        self.dispatch(TodoAction::DeleteRequest(id)).await.map(Some)
    }

    /// Render the store's current state
    pub async fn render(&self) -> Vec<String> {
        self.store.state(render).await
    }

    async fn dispatch(&self, action: TodoAction) -> Result<EffectHandle, StoreError> {
        tracing::debug!(action = action.name(), "Dispatching intent");
        self.store.send(action).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockCall, MockTodoApi, Operation};
    use crate::reducer::{TodoEnvironment, TodoReducer};
    use std::sync::Arc;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo::new(TodoId::new(id), title, completed)
    }

    fn controller(api: &MockTodoApi) -> TodoListController<MockTodoApi> {
        let store = TodoStore::new(
            TodoListState::new(),
            TodoReducer::new(),
            TodoEnvironment::new(Arc::new(api.clone())),
        );
        TodoListController::new(store)
    }

    // ========== render ==========

    #[test]
    fn test_render_idle_list() {
        let state = TodoListState {
            todos: vec![todo(1, "a", false), todo(2, "b", true)],
            ..TodoListState::new()
        };

        assert_eq!(render(&state), vec!["[ ] a", "[x] b"]);
    }

    #[test]
    fn test_render_loading_and_error() {
        let state = TodoListState {
            todos: vec![todo(1, "a", false)],
            loading: true,
            error: Some("Network Error".to_string()),
        };

        assert_eq!(render(&state), vec!["Loading...", "Error: Network Error", "[ ] a"]);
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&TodoListState::new()).is_empty());
    }

    // ========== gestures ==========

    #[tokio::test]
    async fn test_mount_fetches_once() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);

        let first = controller.mount().await?;
        let second = controller.mount().await?;

        assert!(first.is_some());
        assert!(second.is_none());
        if let Some(mut handle) = first {
            handle.wait().await;
        }
        assert_eq!(api.calls(), vec![MockCall::Fetch]);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_adds_untrimmed_title() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);

        controller.set_input("  Buy milk ");
        let handle = controller.submit().await?;

        assert!(handle.is_some());
        assert_eq!(controller.input(), "");
        if let Some(mut handle) = handle {
            handle.wait().await;
        }
        assert_eq!(api.calls(), vec![MockCall::Create(TodoDraft::new("  Buy milk "))]);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);

        controller.set_input("   ");
        assert!(controller.submit().await?.is_none());
        assert_eq!(controller.input(), "   ");
        assert!(!controller.store().state(|s| s.loading).await);
        assert!(api.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_flow_sends_full_record() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);
        let selected = todo(3, "old title", true);

        controller.begin_edit(&selected);
        assert_eq!(controller.input(), "old title");
        assert_eq!(controller.submit_label(), "Update Todo");

        controller.set_input("new title");
        if let Some(mut handle) = controller.submit().await? {
            handle.wait().await;
        }

        assert_eq!(api.calls(), vec![MockCall::Update(todo(3, "new title", true))]);
        assert!(controller.editing().is_none());
        assert_eq!(controller.input(), "");
        assert_eq!(controller.submit_label(), "Add Todo");
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_update_keeps_selection() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);
        let selected = todo(3, "old title", false);

        controller.begin_edit(&selected);
        controller.set_input("");
        assert!(controller.submit().await?.is_none());

        assert_eq!(controller.editing(), Some(&selected));
        assert!(api.calls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_and_wait_returns_stored_record() -> Result<(), StoreError> {
        let api = MockTodoApi::with_todos(vec![todo(1, "a", false)]);
        let mut controller = controller(&api);

        controller.set_input("Buy milk");
        let completion = controller.submit_and_wait(Duration::from_secs(2)).await?;

        assert_eq!(completion, Some(TodoAction::AddSuccess(todo(2, "Buy milk", false))));
        assert_eq!(controller.render().await, vec!["[ ] Buy milk"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_and_wait_reports_failed_add() -> Result<(), StoreError> {
        let api = MockTodoApi::new().failing(Operation::Create, 500);
        let mut controller = controller(&api);

        controller.set_input("Buy milk");
        let completion = controller.submit_and_wait(Duration::from_secs(2)).await?;

        assert!(matches!(completion, Some(TodoAction::AddFailure(_))));
        assert!(controller.store().state(|s| s.todos.is_empty()).await);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_and_wait_ignores_blank_input() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);

        assert!(controller.submit_and_wait(Duration::from_secs(2)).await?.is_none());
        assert!(api.calls().is_empty());
        Ok(())
    }

    #[test]
    fn test_cancel_edit_clears_input_and_selection() {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);

        controller.begin_edit(&todo(1, "a", false));
        controller.cancel_edit();

        assert!(controller.editing().is_none());
        assert_eq!(controller.input(), "");
        assert_eq!(controller.submit_label(), ADD_LABEL);
    }

    #[tokio::test]
    async fn test_delete_sends_request() -> Result<(), StoreError> {
        let api = MockTodoApi::new();
        let mut controller = controller(&api);

        if let Some(mut handle) = controller.delete(TodoId::new(7)).await? {
            handle.wait().await;
        }

        assert_eq!(api.calls(), vec![MockCall::Delete(TodoId::new(7))]);
        Ok(())
    }
}
