//! Validation of manually typed records before they reach the sheet.

use crate::error::{Result, SheetError};
use delivery_sheet_common::types::NOT_AVAILABLE;
use delivery_sheet_common::{format_date, is_valid_date_string, CostPatch, DeliveryPatch, NewCost, NewDelivery};

/// Today's date in ISO form, used when no date is given.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn required(value: String, field: &'static str) -> Result<String> {
    if value.trim().is_empty() {
        Err(SheetError::MissingField(field))
    } else {
        Ok(value.trim().to_string())
    }
}

fn checked_date(date: String) -> Result<String> {
    let trimmed = date.trim();
    if is_valid_date_string(trimmed) {
        // D-M-YYYY is stored with slashes so it formats like D/M/YYYY.
        if trimmed.find('-') == Some(4) {
            Ok(trimmed.to_string())
        } else {
            Ok(trimmed.replace('-', "/"))
        }
    } else {
        Err(SheetError::InvalidDate(date))
    }
}

/// Manual delivery: date, collection and destination are required.
pub fn delivery_entry(
    date: Option<String>,
    collection: String,
    destination: String,
    total: Option<String>,
    observation: Option<String>,
) -> Result<NewDelivery> {
    Ok(NewDelivery {
        date: checked_date(date.unwrap_or_else(today))?,
        collection: required(collection, "coleta")?,
        destination: required(destination, "destino")?,
        total: total.unwrap_or_default().trim().to_string(),
        observation: observation
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    })
}

/// Manual cost: date and description are required.
pub fn cost_entry(
    date: Option<String>,
    description: String,
    total: Option<String>,
    observation: Option<String>,
) -> Result<NewCost> {
    Ok(NewCost {
        date: checked_date(date.unwrap_or_else(today))?,
        description: required(description, "descrição")?,
        total: total.unwrap_or_default().trim().to_string(),
        observation: observation.filter(|o| !o.trim().is_empty()),
    })
}

/// Dates in a patch go through the same check and are stored as DD/MM.
fn patched_date(date: Option<String>) -> Result<Option<String>> {
    date.map(|d| checked_date(d).map(|d| format_date(&d)))
        .transpose()
}

pub fn delivery_patch(mut patch: DeliveryPatch) -> Result<DeliveryPatch> {
    if patch.is_empty() {
        return Err(SheetError::EmptyPatch);
    }
    patch.date = patched_date(patch.date)?;
    Ok(patch)
}

pub fn cost_patch(mut patch: CostPatch) -> Result<CostPatch> {
    if patch.is_empty() {
        return Err(SheetError::EmptyPatch);
    }
    patch.date = patched_date(patch.date)?;
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_entry_defaults() {
        let entry = delivery_entry(Some("2024-03-05".into()), " Rua A ".into(), "Rua B".into(), None, None).unwrap();
        assert_eq!(entry.date, "2024-03-05");
        assert_eq!(entry.collection, "Rua A");
        assert_eq!(entry.total, "");
        assert_eq!(entry.observation, "N/A");
    }

    #[test]
    fn test_delivery_entry_accepts_br_date() {
        assert!(delivery_entry(Some("05/03/2024".into()), "A".into(), "B".into(), None, None).is_ok());
        let dashed = delivery_entry(Some("5-3-2024".into()), "A".into(), "B".into(), None, None).unwrap();
        assert_eq!(dashed.date, "5/3/2024");
    }

    #[test]
    fn test_delivery_entry_rejects_bad_date() {
        let err = delivery_entry(Some("31/02".into()), "A".into(), "B".into(), None, None).unwrap_err();
        assert!(matches!(err, SheetError::InvalidDate(_)));
    }

    #[test]
    fn test_delivery_entry_requires_destination() {
        let err = delivery_entry(Some("2024-03-05".into()), "A".into(), "  ".into(), None, None).unwrap_err();
        assert!(matches!(err, SheetError::MissingField("destino")));
    }

    #[test]
    fn test_cost_entry_observation_optional() {
        let entry = cost_entry(Some("2024-03-05".into()), "Combustível".into(), Some("50".into()), Some(" ".into())).unwrap();
        assert_eq!(entry.observation, None);
        assert_eq!(entry.total, "50");
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let entry = delivery_entry(None, "A".into(), "B".into(), None, None).unwrap();
        assert_eq!(entry.date, today());
        assert!(is_valid_date_string(&entry.date));
    }

    #[test]
    fn test_patch_formats_date() {
        let patch = delivery_patch(DeliveryPatch {
            date: Some("2024-03-05".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.date.as_deref(), Some("05/03"));
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert!(matches!(cost_patch(CostPatch::default()), Err(SheetError::EmptyPatch)));
    }
}
