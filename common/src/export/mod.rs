//! Export core modules shared by every front end.
//!
//! These build bytes or layout data only; writing files is up to the caller.

pub mod table;
pub mod csv_core;
pub mod pdf_core;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use table::{export_file_name, slugify_title, DELIVERY_COLUMNS};
