// src/sheets/systems/mod.rs

pub mod logic;   // Handlers for user actions (add row, edit cell, refresh)
pub mod startup; // Opening the configured sheet
