//! Newsletter subscription route handler.
//!
//! Subscription is a local acknowledgement only, no mailing list backend is
//! wired up. The address is validated, echoed back in a flash notice, and the
//! user is returned to the page they came from.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use crate::routes::{Page, sanitize_return_to};
use crate::shop::Notice;
use crate::state::AppState;

/// Newsletter signup form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
    pub return_to: Option<String>,
}

/// Minimal shape check: one `@` with a dotted domain after it.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Accept a newsletter signup and flash a confirmation.
#[instrument(skip(state, form), fields(return_to = form.return_to.as_deref()))]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> Redirect {
    let email = form.email.trim().to_lowercase();

    if is_valid_email(&email) {
        tracing::info!(%email, "newsletter signup");
        state.push_notice(Notice::success(format!(
            "Thanks for subscribing with {email}!"
        )));
    } else {
        state.push_notice(Notice::warning("Please enter a valid email address."));
    }

    Redirect::to(sanitize_return_to(
        form.return_to.as_deref(),
        Page::Home.href(),
    ))
}
