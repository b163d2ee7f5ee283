use crate::context::AppContext;
use crate::page::Page;
use crate::view::{render, UiState};
use axum::extract::{Form, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Build the axum [`Router`] serving the single page.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/health", get(health))
        .with_state(context)
}

pub async fn serve(context: Arc<AppContext>, listen_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "sonar page listening");
    axum::serve(listener, router(context)).await
}

async fn index(State(context): State<Arc<AppContext>>, Query(state): Query<UiState>) -> Html<String> {
    Html(Page(&render(&context, &state)).to_string())
}

async fn submit(State(context): State<Arc<AppContext>>, Form(state): Form<UiState>) -> Html<String> {
    Html(Page(&render(&context, &state)).to_string())
}

async fn health() -> &'static str {
    "ok"
}
