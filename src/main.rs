// Prevent console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod annotations;
mod app;
mod commands;
mod coords;
mod engine;
mod error;
mod message;
mod models;
mod overlay;
mod pdf_engine;
mod storage;
mod tools;
mod ui;
mod ui_document;
mod ui_welcome;
mod update;
mod viewer;

use app::PdfScribeApp;
use tracing_subscriber::EnvFilter;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::run(PdfScribeApp::update, PdfScribeApp::view)
}
