//! CSV text for the delivery list.

use super::table::{raw_value, DELIVERY_COLUMNS};
use crate::types::DeliveryRecord;

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Header line plus one line per row, every field quoted. No total line.
pub fn deliveries_to_csv(rows: &[DeliveryRecord]) -> String {
    let header = DELIVERY_COLUMNS
        .iter()
        .map(|c| c.label)
        .collect::<Vec<_>>()
        .join(",");

    let lines = rows.iter().map(|row| {
        DELIVERY_COLUMNS
            .iter()
            .map(|c| quote(raw_value(row, c.key)))
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_header_and_quoting() {
        let rows = vec![DeliveryRecord {
            id: 1,
            date: "05/03".into(),
            collection: "Rua A, 10".into(),
            destination: "Loja \"Central\"".into(),
            total: "25,50".into(),
            observation: String::new(),
        }];

        let csv = deliveries_to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Data,Coleta,Destino,Total,Observacao");
        assert_eq!(
            lines[1],
            r#""05/03","Rua A, 10","Loja ""Central""","25,50","""#
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_csv_empty_rows() {
        assert_eq!(deliveries_to_csv(&[]), "Data,Coleta,Destino,Total,Observacao");
    }
}
