//! In-memory record store.
//!
//! `Sheet` owns the two ordered collections and the title. Insertion order is
//! display order. Saving is the caller's job: every mutating call is expected
//! to be followed by an explicit save through the persistence layer.

use crate::error::{Error, Result};
use crate::format::format_date;
use crate::types::{
    CostPatch, CostRecord, DeliveryPatch, DeliveryRecord, ExtractedDelivery, NewCost, NewDelivery,
};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Title used when nothing has been saved yet.
pub const DEFAULT_TITLE: &str = "Planilha de Entregas";

#[derive(Debug, Clone)]
pub struct Sheet {
    title: String,
    deliveries: Vec<DeliveryRecord>,
    costs: Vec<CostRecord>,
    last_id: i64,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl Sheet {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            deliveries: Vec::new(),
            costs: Vec::new(),
            last_id: 0,
        }
    }

    /// Rebuilds a sheet from previously saved parts.
    ///
    /// Rows sharing an id (fractional ids truncated on load can collide) get
    /// a fresh one past the highest id seen.
    pub fn from_parts(
        title: impl Into<String>,
        mut deliveries: Vec<DeliveryRecord>,
        mut costs: Vec<CostRecord>,
    ) -> Self {
        let mut last_id = deliveries
            .iter()
            .map(|d| d.id)
            .chain(costs.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);

        let mut seen = HashSet::new();
        let ids = deliveries
            .iter_mut()
            .map(|d| &mut d.id)
            .chain(costs.iter_mut().map(|c| &mut c.id));
        for id in ids {
            if !seen.insert(*id) {
                last_id += 1;
                *id = last_id;
                seen.insert(last_id);
            }
        }

        Self {
            title: title.into(),
            deliveries,
            costs,
            last_id,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    pub fn costs(&self) -> &[CostRecord] {
        &self.costs
    }

    /// Next id for the `index`-th row of a batch created at `base` ms.
    ///
    /// Ids never go backwards, so rows created within the same millisecond
    /// (or after a clock step back) still get distinct ids.
    fn next_id(&mut self, base: i64, index: usize) -> i64 {
        let candidate = base + index as i64;
        let id = if candidate > self.last_id {
            candidate
        } else {
            self.last_id + 1
        };
        self.last_id = id;
        id
    }

    // =============================================
    // Deliveries
    // =============================================

    pub fn add_delivery(&mut self, new: NewDelivery) -> &DeliveryRecord {
        let id = self.next_id(now_millis(), 0);
        let total = if new.total.trim().is_empty() {
            "0".to_string()
        } else {
            new.total
        };

        self.deliveries.push(DeliveryRecord {
            id,
            date: format_date(&new.date),
            collection: new.collection,
            destination: new.destination,
            total,
            observation: new.observation,
        });
        &self.deliveries[self.deliveries.len() - 1]
    }

    /// Appends extracted candidates in one batch; returns how many rows were added.
    pub fn append_deliveries(&mut self, extracted: Vec<ExtractedDelivery>) -> usize {
        let base = now_millis();
        let count = extracted.len();

        for (index, candidate) in extracted.into_iter().enumerate() {
            let candidate = candidate.with_fallbacks();
            let id = self.next_id(base, index);
            self.deliveries.push(DeliveryRecord {
                id,
                date: format_date(&candidate.date),
                collection: candidate.collection,
                destination: candidate.destination,
                total: candidate.total,
                observation: candidate.observation,
            });
        }

        count
    }

    pub fn update_delivery(&mut self, id: i64, patch: DeliveryPatch) -> Result<&DeliveryRecord> {
        let record = self
            .deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(Error::RecordNotFound(id))?;
        patch.apply(record);
        Ok(record)
    }

    pub fn delete_delivery(&mut self, id: i64) -> Result<DeliveryRecord> {
        let index = self
            .deliveries
            .iter()
            .position(|d| d.id == id)
            .ok_or(Error::RecordNotFound(id))?;
        Ok(self.deliveries.remove(index))
    }

    /// Removes every delivery; returns how many were removed.
    pub fn clear_deliveries(&mut self) -> usize {
        let count = self.deliveries.len();
        self.deliveries.clear();
        count
    }

    // =============================================
    // Costs
    // =============================================

    pub fn add_cost(&mut self, new: NewCost) -> &CostRecord {
        let id = self.next_id(now_millis(), 0);
        let total = if new.total.trim().is_empty() {
            "0".to_string()
        } else {
            new.total
        };

        self.costs.push(CostRecord {
            id,
            date: format_date(&new.date),
            description: new.description,
            total,
            observation: new.observation.unwrap_or_default(),
        });
        &self.costs[self.costs.len() - 1]
    }

    pub fn update_cost(&mut self, id: i64, patch: CostPatch) -> Result<&CostRecord> {
        let record = self
            .costs
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::RecordNotFound(id))?;
        patch.apply(record);
        Ok(record)
    }

    pub fn delete_cost(&mut self, id: i64) -> Result<CostRecord> {
        let index = self
            .costs
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::RecordNotFound(id))?;
        Ok(self.costs.remove(index))
    }

    pub fn clear_costs(&mut self) -> usize {
        let count = self.costs.len();
        self.costs.clear();
        count
    }
}
