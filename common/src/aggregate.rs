//! Totals and per-key breakdowns, recomputed on every read.

use crate::types::{CostRecord, DeliveryRecord};
use std::collections::HashMap;

/// Bucket for rows whose key is blank.
pub const UNSPECIFIED: &str = "Não especificado";

/// A row that carries an amount and a grouping key.
pub trait Priced {
    fn amount(&self) -> f64;
    /// Destination for deliveries, description for costs.
    fn group_key(&self) -> &str;
}

impl Priced for DeliveryRecord {
    fn amount(&self) -> f64 {
        DeliveryRecord::amount(self)
    }

    fn group_key(&self) -> &str {
        &self.destination
    }
}

impl Priced for CostRecord {
    fn amount(&self) -> f64 {
        CostRecord::amount(self)
    }

    fn group_key(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownItem {
    pub label: String,
    pub total: f64,
}

/// Sum of every row's amount; unreadable totals count as zero.
pub fn total<T: Priced>(records: &[T]) -> f64 {
    records.iter().map(Priced::amount).sum()
}

/// Sums amounts per trimmed key, largest first.
///
/// Equal sums keep the order in which their key was first seen.
pub fn breakdown<T: Priced>(records: &[T]) -> Vec<BreakdownItem> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut items: Vec<BreakdownItem> = Vec::new();

    for record in records {
        let key = record.group_key().trim();
        let label = if key.is_empty() { UNSPECIFIED } else { key };

        match index.get(label) {
            Some(&i) => items[i].total += record.amount(),
            None => {
                index.insert(label.to_string(), items.len());
                items.push(BreakdownItem {
                    label: label.to_string(),
                    total: record.amount(),
                });
            }
        }
    }

    items.sort_by(|a, b| b.total.total_cmp(&a.total));
    items
}

/// Figures shown on the summary screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub deliveries_total: f64,
    pub costs_total: f64,
    pub by_destination: Vec<BreakdownItem>,
    pub by_category: Vec<BreakdownItem>,
}

impl Summary {
    pub fn new(deliveries: &[DeliveryRecord], costs: &[CostRecord]) -> Self {
        Self {
            deliveries_total: total(deliveries),
            costs_total: total(costs),
            by_destination: breakdown(deliveries),
            by_category: breakdown(costs),
        }
    }

    /// Revenue minus costs.
    pub fn net(&self) -> f64 {
        self.deliveries_total - self.costs_total
    }

    pub fn is_profit(&self) -> bool {
        self.net() >= 0.0
    }
}
