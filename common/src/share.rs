//! Share links: a WhatsApp message and an email draft summarizing the sheet.

use crate::aggregate::total;
use crate::format::format_currency;
use crate::types::DeliveryRecord;

/// Rows included in the preview.
pub const PREVIEW_ROWS: usize = 5;

const WHATSAPP_URL: &str = "https://api.whatsapp.com/send";

/// Message text for WhatsApp (uses `*bold*` markup).
pub fn whatsapp_text(title: &str, deliveries: &[DeliveryRecord]) -> String {
    let mut text = format!("📋 *Resumo da Planilha: {}*\n\n", title);
    text.push_str(&format!("Total de Entregas: *{}*\n", deliveries.len()));
    text.push_str(&format!("Valor Total: *{}*\n", format_currency(total(deliveries))));

    let preview = &deliveries[..deliveries.len().min(PREVIEW_ROWS)];
    if !preview.is_empty() {
        text.push_str("\n*Prévia das Entregas:*\n");
        for row in preview {
            text.push_str(&format!(
                "- *Destino:* {}, *Total:* {}\n",
                row.destination,
                format_currency(&row.total)
            ));
        }
    }

    text
}

pub fn whatsapp_link(title: &str, deliveries: &[DeliveryRecord]) -> String {
    format!(
        "{}?text={}",
        WHATSAPP_URL,
        urlencoding::encode(&whatsapp_text(title, deliveries))
    )
}

pub fn email_subject(title: &str) -> String {
    format!("Resumo da Planilha: {}", title)
}

pub fn email_body(title: &str, deliveries: &[DeliveryRecord]) -> String {
    let mut body = String::from("Olá,\n\n");
    body.push_str(&format!("Segue o resumo da planilha \"{}\":\n\n", title));
    body.push_str(&format!("Total de Entregas: {}\n", deliveries.len()));
    body.push_str(&format!("Valor Total: {}\n\n", format_currency(total(deliveries))));

    let preview = &deliveries[..deliveries.len().min(PREVIEW_ROWS)];
    if !preview.is_empty() {
        body.push_str(&format!("Prévia das primeiras {} entregas:\n\n", PREVIEW_ROWS));
        for row in preview {
            body.push_str(&format!("Data: {}\n", row.date));
            body.push_str(&format!("Destino: {}\n", row.destination));
            body.push_str(&format!("Total: {}\n", format_currency(&row.total)));
            body.push_str("-----------------\n");
        }
    }

    body.push_str(
        "\nPara a planilha completa, exporte os arquivos (CSV, PDF, Excel) diretamente do aplicativo.\n\n",
    );
    body.push_str("Atenciosamente.");
    body
}

/// `mailto:` link with no recipient, so the mail client asks for one.
pub fn email_link(title: &str, deliveries: &[DeliveryRecord]) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(&email_subject(title)),
        urlencoding::encode(&email_body(title, deliveries))
    )
}
