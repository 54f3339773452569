//! Timeline glue for Warbler: like toggles and new-message submission.
//!
//! A [`controller::MessageController`] is mounted on a [`page::Page`] with a
//! [`api::MessagesApi`] implementation, receives clicks as
//! [`page::UiEvent`]s and patches the page from the server's answers.

pub mod api;
pub mod config;
pub mod controller;
pub mod core;
pub mod models;
pub mod page;
pub mod templates;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use api::MessagesApi;
#[cfg(not(target_arch = "wasm32"))]
pub use api::HttpApi;
pub use controller::{MessageController, Outcome};
pub use crate::core::errors::ClientError;
pub use page::{Listener, MemoryPage, Page, UiEvent};
