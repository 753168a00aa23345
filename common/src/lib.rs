//! Delivery Sheet Common Library
//!
//! Data model, formatting, aggregation and export cores shared by the CLI
//! and any other front end.

pub mod types;
pub mod format;
pub mod sheet;
pub mod aggregate;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod share;
pub mod export;

pub use types::{
    CostPatch, CostRecord, DeliveryPatch, DeliveryRecord, ExtractedDelivery, NewCost, NewDelivery,
};
pub use format::{amount_or_zero, format_currency, format_date, is_valid_date_string, parse_amount};
pub use sheet::{Sheet, DEFAULT_TITLE};
pub use aggregate::{breakdown, total, BreakdownItem, Priced, Summary};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_extraction_response};
pub use prompts::{response_schema, EXTRACTION_PROMPT};
