//! Extraction response parser
//!
//! Pulls the JSON array out of the model's text and turns it into delivery
//! candidates.

use crate::error::{Error, Result};
use crate::types::ExtractedDelivery;

/// Locates the JSON part of a response.
///
/// Tried in order:
/// 1. a ```json ... ``` block
/// 2. the outermost `[...]` array
/// 3. the outermost `{...}` object
///
/// # Examples
/// ```
/// use delivery_sheet_common::extract_json;
///
/// let response = "Aqui está:\n[{\"date\": \"05/03\"}]";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('['));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    for (open, close) in [('[', ']'), ('{', '}')] {
        if let (Some(start), Some(end)) = (response.find(open), response.rfind(close)) {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON não encontrado na resposta".into()))
}

/// Parses the extraction response into candidates.
///
/// A bare object is accepted as a single candidate. An empty or whitespace
/// response is an error, so is anything that is not the expected shape.
pub fn parse_extraction_response(response: &str) -> Result<Vec<ExtractedDelivery>> {
    let response = response.trim();
    if response.is_empty() {
        return Err(Error::Parse("resposta vazia".into()));
    }

    let json_str = extract_json(response)?;
    let value: serde_json::Value = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("JSON inválido: {}", e)))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        object @ serde_json::Value::Object(_) => vec![object],
        other => {
            return Err(Error::Parse(format!(
                "esperado um array de entregas, recebido: {}",
                other
            )))
        }
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| Error::Parse(format!("entrega inválida: {}", e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = r#"Segue o resultado:
```json
[
  {"date": "05/03", "destination": "Centro"}
]
```
Mais texto."#;

        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("Centro"));
    }

    #[test]
    fn test_extract_json_raw_array() {
        let response = r#"[{"date": "05/03"}]"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_not_found() {
        assert!(matches!(extract_json("nenhum dado"), Err(Error::Parse(_))));
    }

    // =============================================
    // parse_extraction_response
    // =============================================

    #[test]
    fn test_parse_two_deliveries() {
        let response = r#"[
            {"date": "05/03", "collection": "Rua A, 1", "destination": "Rua B, 2", "total": "25,00", "observation": "frágil"},
            {"date": "06/03", "collection": "Rua C, 3", "destination": "Rua D, 4", "total": "0", "observation": ""}
        ]"#;

        let rows = parse_extraction_response(response).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].observation, "frágil");
        assert_eq!(rows[1].destination, "Rua D, 4");
    }

    #[test]
    fn test_parse_empty_array() {
        let rows = parse_extraction_response("[]").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_single_object() {
        let rows = parse_extraction_response(r#"{"date": "01/01", "total": "10"}"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, "10");
        assert_eq!(rows[0].collection, "");
    }

    #[test]
    fn test_parse_null_fields_keep_row() {
        let response = r#"[{"date":"05/03","collection":null,"destination":"Centro","total":null,"observation":null}]"#;
        let rows = parse_extraction_response(response).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].collection, "");

        let row = rows[0].clone().with_fallbacks();
        assert_eq!(row.collection, "N/A");
        assert_eq!(row.total, "0");
        assert_eq!(row.observation, "");
    }

    #[test]
    fn test_parse_numeric_total() {
        let rows = parse_extraction_response(r#"[{"date":"05/03","destination":"Centro","total":25.5}]"#).unwrap();
        assert_eq!(rows[0].total, "25.5");
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_extraction_response("").is_err());
        assert!(parse_extraction_response("   \n").is_err());
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(parse_extraction_response("[{\"date\": ").is_err());
        assert!(parse_extraction_response("[1, 2]").is_err());
    }
}
