// src/models/mod.rs

pub mod attempt;
pub mod blog;
pub mod contact;
pub mod lesson;
pub mod quiz;
pub mod subscriber;
pub mod user;
pub mod worksheet;
