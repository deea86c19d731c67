//! Restaurant directory: listings, reviews guarded by reCAPTCHA, a contact
//! form and a small JSON API over the same restaurant documents.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pages;
pub mod recaptcha;
pub mod render;
