// src/ui/elements/mod.rs
pub mod editor;
