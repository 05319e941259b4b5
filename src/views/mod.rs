// src/views/mod.rs
//
// Server-rendered pages. Every view takes the active language explicitly.

pub mod blog;
pub mod components;
pub mod layout;
pub mod lessons;
pub mod pages;
pub mod worksheets;

pub use layout::{PageMeta, page};
