// src/utils/mod.rs

pub mod hash;
pub mod html;
pub mod jwt;
pub mod media;
pub mod pagination;
pub mod search;
pub mod slug;
