pub mod download;
pub mod health;
pub mod pages;
pub mod tailor;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(tailor::handle_index).post(tailor::handle_submit),
        )
        .route("/download/:id", get(download::handle_download_page))
        .route("/download/html/:id", get(download::handle_download_html))
        .route("/download/pdf/:id", get(download::handle_download_pdf))
        .route("/download/docx/:id", get(download::handle_download_docx))
        .with_state(state)
}
