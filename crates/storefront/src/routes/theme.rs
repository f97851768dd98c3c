//! Theme toggle route handler.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::routes::{Page, sanitize_return_to};
use crate::state::AppState;

/// Theme toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub return_to: Option<String>,
}

/// Flip between light and dark, persist, and redirect back.
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    state.shop().toggle_theme()?;

    Ok(Redirect::to(sanitize_return_to(
        form.return_to.as_deref(),
        Page::Home.href(),
    )))
}
