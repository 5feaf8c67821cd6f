//! Theory page rendering.

use axum::response::Json;
use serde::Deserialize;

use crate::theory::{self, TheoryDocument};

#[derive(Debug, Deserialize)]
pub struct RenderTheoryBody {
    pub title: String,
    pub markdown_text: String,
}

/// `POST /theory/render` — turn lesson markdown into renderable blocks.
pub async fn render(Json(body): Json<RenderTheoryBody>) -> Json<TheoryDocument> {
    Json(theory::render_theory(&body.title, &body.markdown_text))
}
