//! Core library for the Reseña client (API client, session, forms, config).

pub mod api;
pub mod config;
pub mod forms;
pub mod logging;
pub mod messages;
pub mod session;
