//! Delivery Sheet
//!
//! Delivery and cost tracking with AI extraction of delivery receipts.
//! The sheet model lives in `delivery-sheet-common`; this crate adds the
//! CLI, configuration, persistence, extraction and export file writers.

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod extractor;
pub mod persistence;
pub mod scanner;
