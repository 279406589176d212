//! deepEUC: a single-screen chat client for the deepEUC completion backend.

pub mod api;
pub mod config;
pub mod conversation;
pub mod markdown;
pub mod storage;
pub mod types;
pub mod ui;
pub mod views;
