//! Gearlog Desktop Application
//!
//! A cross-platform desktop app for tracking PPE inventory and capturing
//! inspections, online or offline.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;
mod views;

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gearlog=debug".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Gearlog...");

    dioxus::launch(app::App);
}
