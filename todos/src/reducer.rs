//! Reducer logic for the to-do list.
//!
//! Intents set `loading` and hand the network call to the effect
//! coordinator. Completions clear `loading` and either apply the server's
//! answer (clearing `error`) or record the failure message.

use crate::api::TodoApi;
use crate::config::{Config, DEFAULT_FETCH_LIMIT};
use crate::effects;
use crate::types::{Todo, TodoAction, TodoId, TodoListState};
use saga_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Environment dependencies for the to-do reducer
pub struct TodoEnvironment<A> {
    /// Remote to-do service
    pub api: Arc<A>,
    /// Number of records kept after a fetch
    pub fetch_limit: usize,
}

impl<A: TodoApi> TodoEnvironment<A> {
    /// Creates an environment with the default fetch limit
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self {
            api,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// Creates an environment using the settings in `config`
    #[must_use]
    pub const fn from_config(api: Arc<A>, config: &Config) -> Self {
        Self {
            api,
            fetch_limit: config.fetch_limit,
        }
    }

    /// Overrides the fetch limit
    #[must_use]
    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }
}

// Manual impl: the api is shared, so `A` itself need not be `Clone`
impl<A> Clone for TodoEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            fetch_limit: self.fetch_limit,
        }
    }
}

impl<A> std::fmt::Debug for TodoEnvironment<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("fetch_limit", &self.fetch_limit)
            .finish_non_exhaustive()
    }
}

/// Reducer for the to-do list
///
/// Generic over the service client so the environment can hold it without
/// boxing.
pub struct TodoReducer<A> {
    _phantom: PhantomData<fn() -> A>,
}

impl<A> TodoReducer<A> {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    /// Common part of every successful completion
    fn succeed(state: &mut TodoListState) {
        state.loading = false;
        state.error = None;
    }

    /// Common part of every failed completion; the list is left untouched
    fn fail(state: &mut TodoListState, message: String) {
        state.loading = false;
        state.error = Some(message);
    }

    /// Replace the record with the same id, keeping its position
    fn replace(todos: &mut [Todo], updated: Todo) {
        if let Some(slot) = todos.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }

    fn remove(todos: &mut Vec<Todo>, id: TodoId) {
        todos.retain(|t| t.id != id);
    }
}

impl<A> Default for TodoReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for TodoReducer<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for TodoReducer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TodoReducer")
    }
}

impl<A> Reducer for TodoReducer<A>
where
    A: TodoApi + 'static,
{
    type State = TodoListState;
    type Action = TodoAction;
    type Environment = TodoEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.name(), "Reducing");

        match action {
            // ========== Intents ==========
            TodoAction::FetchRequest => {
                state.loading = true;
                smallvec![effects::fetch_todos(env)]
            },
            TodoAction::AddRequest(draft) => {
                state.loading = true;
                smallvec![effects::add_todo(env, draft)]
            },
            TodoAction::UpdateRequest(todo) => {
                state.loading = true;
                smallvec![effects::update_todo(env, todo)]
            },
            TodoAction::DeleteRequest(id) => {
                state.loading = true;
                smallvec![effects::delete_todo(env, id)]
            },

            // ========== Successes ==========
            TodoAction::FetchSuccess(todos) => {
                Self::succeed(state);
                state.todos = todos;
                SmallVec::new()
            },
            TodoAction::AddSuccess(todo) => {
                Self::succeed(state);
                state.todos.push(todo);
                SmallVec::new()
            },
            TodoAction::UpdateSuccess(todo) => {
                Self::succeed(state);
                Self::replace(&mut state.todos, todo);
                SmallVec::new()
            },
            TodoAction::DeleteSuccess(id) => {
                Self::succeed(state);
                Self::remove(&mut state.todos, id);
                SmallVec::new()
            },

            // ========== Failures ==========
            TodoAction::FetchFailure(message)
            | TodoAction::AddFailure(message)
            | TodoAction::UpdateFailure(message)
            | TodoAction::DeleteFailure(message) => {
                Self::fail(state, message);
                SmallVec::new()
            },
        }
    }
}
