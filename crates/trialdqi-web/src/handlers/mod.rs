//! HTTP handlers for all web routes.

pub mod layout;
pub mod landing;
pub mod study;
pub mod site;
pub mod patient;
pub mod alerts;
pub mod not_found;
pub mod api;
pub mod assets;
