//! Not-found views. Every miss renders a page with a way back, never a panic.

use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use super::layout::{dashboard_page, escape, Nav};

/// 404 page inside the dashboard shell.
pub fn not_found_page(
    message: &str,
    back_href: &str,
    back_label: &str,
    study_id: Option<&str>,
) -> Response {
    let content = format!(r#"
<div class="empty-state">
    <p class="text-muted">{}</p>
    <a href="{}" class="link">{}</a>
</div>"#, escape(message), escape(back_href), escape(back_label));

    (
        StatusCode::NOT_FOUND,
        Html(dashboard_page(message, study_id, Nav::None, &content)),
    )
        .into_response()
}

pub fn study_not_found() -> Response {
    not_found_page("Study not found", "/", "Return to study selection", None)
}

/// Router fallback for unknown paths.
pub async fn fallback(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "no route");
    not_found_page("Page not found", "/", "Return to study selection", None)
}
