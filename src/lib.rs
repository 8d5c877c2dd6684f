//! Core library for taskbin: task collections, the trash lifecycle, the
//! single-slot undo controller, and JSON persistence.

pub mod commands;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
pub mod tui;
pub mod undo;
