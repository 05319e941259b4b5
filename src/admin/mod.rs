// src/admin/mod.rs

pub mod forms;
