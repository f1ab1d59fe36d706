//! Embedded stylesheet.

use axum::{http::header, response::IntoResponse};

pub const MAIN_CSS: &str = include_str!("../../static/css/main.css");

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], MAIN_CSS)
}
