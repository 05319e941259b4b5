// src/serializers/mod.rs
//
// JSON shapes of the public API. Stored media paths are resolved to absolute
// URLs for the current request while building them.

pub mod lesson;
pub mod quiz;
pub mod worksheet;
