//! Library exports for photoshare, shared between the binary and tests.

pub mod alert;
pub mod api;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod interceptors;
pub mod models;
pub mod navigation;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
