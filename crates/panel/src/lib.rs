//! `content-admin-panel`
//!
//! **Responsibility:** the admin panel over the content API.
//!
//! This crate provides:
//! - Environment configuration ([`PanelConfig`])
//! - Routing between the five screens ([`Route`])
//! - View models for the dashboard, list, editor, and settings screens
//! - A terminal shell (the `content-admin` binary) and, on wasm32, a Leptos frontend
//!
//! Views never talk HTTP themselves; they are driven through
//! [`content_admin_client::ProductApi`] and a [`Prompt`] for confirmations.

pub mod config;
pub mod prompt;
pub mod route;
pub mod views;

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, PanelConfig};
pub use prompt::{AssumeYes, Prompt};
pub use route::{Route, UnknownRoute};
pub use views::{
    ContentsView, DashboardView, DeleteOutcome, EditorMode, EditorView, SettingsView,
};
