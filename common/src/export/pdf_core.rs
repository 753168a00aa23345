//! Table layout for the PDF export (A4 portrait, millimetres from the top).
//!
//! Drawing is done by the caller; this module decides what goes on each page
//! and where.

use super::table::{display_value, DELIVERY_COLUMNS};
use crate::aggregate::total;
use crate::format::format_currency;
use crate::types::DeliveryRecord;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct PdfTableLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub title_y_mm: f32,
    pub title_size_pt: f32,
    /// Table start on the first page, below the title
    pub first_table_top_mm: f32,
    pub header_height_mm: f32,
    pub row_height_mm: f32,
    pub font_size_pt: f32,
    pub cell_padding_mm: f32,
    pub footer_gap_mm: f32,
    pub footer_size_pt: f32,
}

impl Default for PdfTableLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 14.0,
            title_y_mm: 22.0,
            title_size_pt: 18.0,
            first_table_top_mm: 30.0,
            header_height_mm: 9.0,
            row_height_mm: 8.0,
            font_size_pt: 10.0,
            cell_padding_mm: 1.5,
            footer_gap_mm: 10.0,
            footer_size_pt: 12.0,
        }
    }
}

impl PdfTableLayout {
    pub fn table_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    pub fn column_widths_mm(&self) -> Vec<f32> {
        let width = self.table_width_mm();
        DELIVERY_COLUMNS.iter().map(|c| c.pdf_weight * width).collect()
    }

    /// Left edge of every column.
    pub fn column_x_mm(&self) -> Vec<f32> {
        let mut x = self.margin_mm;
        self.column_widths_mm()
            .into_iter()
            .map(|w| {
                let left = x;
                x += w;
                left
            })
            .collect()
    }

    pub fn table_top_mm(&self, page: usize) -> f32 {
        if page == 0 {
            self.first_table_top_mm
        } else {
            self.margin_mm
        }
    }

    fn bottom_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    pub fn rows_per_page(&self, page: usize) -> usize {
        let available = self.bottom_mm() - self.table_top_mm(page) - self.header_height_mm;
        ((available / self.row_height_mm).floor() as usize).max(1)
    }

    /// Top of the `slot`-th body row on `page`.
    pub fn row_top_mm(&self, page: usize, slot: usize) -> f32 {
        self.table_top_mm(page) + self.header_height_mm + slot as f32 * self.row_height_mm
    }

    /// printpdf measures from the bottom edge.
    pub fn to_pdf_y(&self, top_mm: f32) -> f32 {
        self.page_height_mm - top_mm
    }

    /// Characters that fit in `width_mm` at the body font size.
    pub fn max_chars(&self, width_mm: f32) -> usize {
        let glyph_mm = self.font_size_pt * AVG_GLYPH_EM * PT_TO_MM;
        (((width_mm - self.cell_padding_mm * 2.0) / glyph_mm).floor() as usize).max(1)
    }
}

/// Cuts `text` to `max_chars`, ending with `...` when shortened.
pub fn fit_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.push_str("...");
    cut
}

/// Everything the renderer needs, already split into pages.
#[derive(Debug, Clone)]
pub struct PdfTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    /// pages -> rows -> cells
    pub pages: Vec<Vec<Vec<String>>>,
    pub grand_total: String,
    /// Footer top position and the page it is drawn on.
    pub footer_page: usize,
    pub footer_top_mm: f32,
}

pub fn build_pdf_table(title: &str, rows: &[DeliveryRecord], layout: &PdfTableLayout) -> PdfTable {
    let widths = layout.column_widths_mm();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            DELIVERY_COLUMNS
                .iter()
                .zip(&widths)
                .map(|(column, width)| fit_text(&display_value(row, column.key), layout.max_chars(*width)))
                .collect()
        })
        .collect();

    let mut pages: Vec<Vec<Vec<String>>> = Vec::new();
    let mut remaining = cells.into_iter().peekable();
    loop {
        let capacity = layout.rows_per_page(pages.len());
        let page: Vec<Vec<String>> = remaining.by_ref().take(capacity).collect();
        pages.push(page);
        if remaining.peek().is_none() {
            break;
        }
    }

    let last = pages.len() - 1;
    let mut footer_page = last;
    let mut footer_top_mm = layout.row_top_mm(last, pages[last].len()) + layout.footer_gap_mm;
    if footer_top_mm > layout.page_height_mm - layout.margin_mm {
        footer_page = last + 1;
        footer_top_mm = layout.margin_mm + layout.footer_gap_mm;
    }

    PdfTable {
        title: title.to_string(),
        headers: DELIVERY_COLUMNS.iter().map(|c| c.label).collect(),
        pages,
        grand_total: format_currency(total(rows)),
        footer_page,
        footer_top_mm,
    }
}
