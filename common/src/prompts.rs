//! Extraction request content shared by every provider:
//! - EXTRACTION_PROMPT: the instruction sent with each receipt image
//! - EXTRACTION_FIELDS: the five fields every candidate must carry
//! - response_schema: the JSON schema the provider must answer with

use serde_json::{json, Value};

/// Fields of one extracted delivery, in schema order.
pub const EXTRACTION_FIELDS: &[&str] = &["date", "collection", "destination", "total", "observation"];

/// Instruction sent together with the image.
pub const EXTRACTION_PROMPT: &str = r#"Analise a imagem, que pode conter uma ou mais etiquetas ou comprovantes de entrega.
Para cada entrega individual identificada, extraia:
1. "date": a data da entrega no formato DD/MM. Ignore o ano, se houver.
2. "collection": o endereço de COLETA (normalmente o primeiro endereço ou o remetente).
3. "destination": o endereço de DESTINO (normalmente o segundo endereço ou o destinatário).
4. "total": o valor total do serviço, apenas o número (pode vir precedido de "R$"). Se não houver valor, retorne "0".
5. "observation": qualquer observação ou nota relevante (ex.: "frágil", "deixar na portaria"). Se não houver, retorne "".

Diferencie claramente coleta e destino.
Retorne um array de objetos JSON, mesmo que exista apenas uma entrega."#;

/// Response schema: an array of objects with the five required string fields.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "date": { "type": "STRING", "description": "Data da entrega no formato DD/MM." },
                "collection": { "type": "STRING", "description": "Endereço de coleta." },
                "destination": { "type": "STRING", "description": "Endereço de destino/destinatário." },
                "total": { "type": "STRING", "description": "Valor total do serviço como texto numérico." },
                "observation": { "type": "STRING", "description": "Observação ou nota. Pode ser vazia." }
            },
            "required": EXTRACTION_FIELDS
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_every_field() {
        let schema = response_schema();
        let required: Vec<&str> = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, EXTRACTION_FIELDS);

        for field in EXTRACTION_FIELDS {
            assert_eq!(schema["items"]["properties"][field]["type"], "STRING");
        }
    }

    #[test]
    fn test_prompt_mentions_every_field() {
        for field in EXTRACTION_FIELDS {
            assert!(EXTRACTION_PROMPT.contains(&format!("\"{}\"", field)));
        }
    }
}
