use std::sync::Arc;

use anyhow::Result;
use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::views::Views;
use crate::error::BoardError;
use crate::storage::MessageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>) -> Result<Self> {
        Ok(Self {
            store,
            views: Arc::new(Views::new()?),
        })
    }

    /// Runs a blocking store call off the async runtime.
    async fn with_store<T, F>(&self, op: F) -> Result<T, BoardError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn MessageStore) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();

        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await?
            .map_err(BoardError::Store)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/form", get(form_page).post(submit))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, BoardError> {
    let latest = state.with_store(|store| store.latest()).await?;
    debug!(found = latest.is_some(), "rendering home");

    Ok(Html(state.views.home(latest.as_ref())?))
}

async fn form_page(State(state): State<AppState>) -> Result<Html<String>, BoardError> {
    Ok(Html(state.views.form()?))
}

/// Value of the last `content` pair; a missing field is stored as empty.
fn submitted_content(fields: Vec<(String, String)>) -> String {
    fields
        .into_iter()
        .filter(|(name, _)| name == "content")
        .last()
        .map(|(_, value)| value)
        .unwrap_or_default()
}

async fn submit(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, BoardError> {
    let content = submitted_content(fields);
    let length = content.len();

    let id = state.with_store(move |store| store.insert(&content)).await?;
    info!(id = %id, bytes = length, "message stored");

    Ok(Redirect::to("/"))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
