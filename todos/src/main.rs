//! Command-line walkthrough of the to-do client.
//!
//! Loads the list from the configured service, then adds a record, renames
//! it and deletes it again, printing the rendered list after every step.

use saga_todo::{
    Config, HttpTodoApi, TodoAction, TodoEnvironment, TodoListController, TodoListState,
    TodoReducer, TodoStore,
};
use saga_todo_runtime::EffectHandle;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long each step may take before the walkthrough moves on
const STEP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "saga_todo=debug,saga_todo_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        api_url = %config.api_url,
        fetch_limit = config.fetch_limit,
        "Configuration loaded"
    );

    let api = Arc::new(HttpTodoApi::new(config.api_url.clone()));
    let store = TodoStore::new(
        TodoListState::new(),
        TodoReducer::new(),
        TodoEnvironment::from_config(api, &config),
    );
    let mut controller = TodoListController::new(store.clone());

    println!("=== Todo Walkthrough ===\n");

    println!("Loading todos...");
    settle(controller.mount().await?).await;
    print_list(&controller).await;

    println!("\nAdding 'Buy milk'...");
    controller.set_input("Buy milk");
    let completion = controller.submit_and_wait(STEP_TIMEOUT).await?;
    print_list(&controller).await;

    let Some(TodoAction::AddSuccess(added)) = completion else {
        println!("\nAdd did not succeed, skipping edit and delete");
        store.shutdown(STEP_TIMEOUT).await?;
        return Ok(());
    };

    println!("\nRenaming '{}'...", added.title);
    controller.begin_edit(&added);
    controller.set_input(format!("{} (edited)", added.title));
    settle(controller.submit().await?).await;
    print_list(&controller).await;

    println!("\nDeleting todo {}...", added.id);
    settle(controller.delete(added.id).await?).await;
    print_list(&controller).await;

    store.shutdown(STEP_TIMEOUT).await?;
    println!("\n=== Walkthrough Complete ===");
    Ok(())
}

/// Wait for the completion of one step, if it started any
async fn settle(handle: Option<EffectHandle>) {
    if let Some(mut handle) = handle {
        if handle.wait_with_timeout(STEP_TIMEOUT).await.is_err() {
            tracing::warn!("Step still running after {:?}", STEP_TIMEOUT);
        }
    }
}

async fn print_list(controller: &TodoListController<HttpTodoApi>) {
    for line in controller.render().await {
        println!("  {line}");
    }
}
