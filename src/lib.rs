//! Trip Guide Library
//!
//! This module exposes the application state, rendering pipeline, service
//! client and UI so the binary and the integration tests share them.

pub mod app;
pub mod background;
pub mod cli;
pub mod data;
pub mod form;
pub mod logging;
pub mod render;
pub mod ui;
pub mod view;
