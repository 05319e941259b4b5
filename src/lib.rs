// src/lib.rs

rust_i18n::i18n!("locales", fallback = "en");

pub mod admin;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod routes;
pub mod serializers;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::create_router;
