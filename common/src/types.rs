//! Record types shared by the store, the extractor and the exporters.
//!
//! - DeliveryRecord / CostRecord: rows as stored and persisted
//! - NewDelivery / NewCost: manual-entry input (no id yet)
//! - DeliveryPatch / CostPatch: field-level edits
//! - ExtractedDelivery: one candidate row returned by the AI

use crate::format::amount_or_zero;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder written into address fields the AI could not read.
pub const NOT_AVAILABLE: &str = "N/A";

/// One tracked shipment leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    #[serde(deserialize_with = "whole_id")]
    pub id: i64,

    #[serde(default)]
    pub date: String,

    /// Pickup address
    #[serde(default)]
    pub collection: String,

    /// Drop-off address
    #[serde(default)]
    pub destination: String,

    #[serde(default = "default_total")]
    pub total: String,

    #[serde(default)]
    pub observation: String,
}

/// One tracked expense line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    #[serde(deserialize_with = "whole_id")]
    pub id: i64,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_total")]
    pub total: String,

    #[serde(default)]
    pub observation: String,
}

fn default_total() -> String {
    "0".to_string()
}

/// Accepts fractional ids from older saves, truncated to whole milliseconds.
fn whole_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
            .ok_or_else(|| D::Error::custom(format!("id inválido: {}", n))),
        other => Err(D::Error::custom(format!("id inválido: {}", other))),
    }
}

/// Reads a model-supplied field as text: null gives "", numbers and
/// booleans their JSON text.
fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(other) => Err(D::Error::custom(format!("esperado texto, recebido: {}", other))),
    }
}

impl DeliveryRecord {
    /// Parsed `total`, zero when it is not numeric.
    pub fn amount(&self) -> f64 {
        amount_or_zero(&self.total)
    }
}

impl CostRecord {
    pub fn amount(&self) -> f64 {
        amount_or_zero(&self.total)
    }
}

/// Manual delivery entry.
#[derive(Debug, Clone, Default)]
pub struct NewDelivery {
    pub date: String,
    pub collection: String,
    pub destination: String,
    pub total: String,
    pub observation: String,
}

/// Manual cost entry.
#[derive(Debug, Clone, Default)]
pub struct NewCost {
    pub date: String,
    pub description: String,
    pub total: String,
    pub observation: Option<String>,
}

/// Field-level edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct DeliveryPatch {
    pub date: Option<String>,
    pub collection: Option<String>,
    pub destination: Option<String>,
    pub total: Option<String>,
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CostPatch {
    pub date: Option<String>,
    pub description: Option<String>,
    pub total: Option<String>,
    pub observation: Option<String>,
}

impl DeliveryPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.collection.is_none()
            && self.destination.is_none()
            && self.total.is_none()
            && self.observation.is_none()
    }

    pub(crate) fn apply(self, record: &mut DeliveryRecord) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(collection) = self.collection {
            record.collection = collection;
        }
        if let Some(destination) = self.destination {
            record.destination = destination;
        }
        if let Some(total) = self.total {
            record.total = total;
        }
        if let Some(observation) = self.observation {
            record.observation = observation;
        }
    }
}

impl CostPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.total.is_none()
            && self.observation.is_none()
    }

    pub(crate) fn apply(self, record: &mut CostRecord) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(total) = self.total {
            record.total = total;
        }
        if let Some(observation) = self.observation {
            record.observation = observation;
        }
    }
}

/// One delivery candidate read from a receipt image.
///
/// All fields are required by the response schema, but the model may still
/// leave them out, blank or null, or send a bare number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedDelivery {
    #[serde(deserialize_with = "loose_text")]
    pub date: String,
    #[serde(deserialize_with = "loose_text")]
    pub collection: String,
    #[serde(deserialize_with = "loose_text")]
    pub destination: String,
    #[serde(deserialize_with = "loose_text")]
    pub total: String,
    #[serde(deserialize_with = "loose_text")]
    pub observation: String,
}

impl ExtractedDelivery {
    /// Applies the field fallbacks used when a candidate becomes a row.
    pub fn with_fallbacks(self) -> Self {
        Self {
            date: self.date,
            collection: non_blank_or(self.collection, NOT_AVAILABLE),
            destination: non_blank_or(self.destination, NOT_AVAILABLE),
            total: non_blank_or(self.total, "0"),
            observation: self.observation,
        }
    }
}

fn non_blank_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
