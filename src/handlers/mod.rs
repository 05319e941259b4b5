// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod lessons;
pub mod media;
pub mod pages;
pub mod quiz;
pub mod subscription;
