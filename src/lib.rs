//! Terminal control panel for Docker images and containers.

pub mod action;
pub mod app;
pub mod components;
pub mod config;
pub mod docker;
pub mod error;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod panel;
pub mod render_loop;
pub mod task_queue;
pub mod tui;
pub mod ui;
