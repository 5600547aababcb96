//! Debounced movie search backed by TMDB, with trending search terms kept in
//! Appwrite.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod view;
