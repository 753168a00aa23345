use crate::error::{Result, SheetError};
use delivery_sheet_common::export::pdf_core::{build_pdf_table, PdfTable, PdfTableLayout};
use delivery_sheet_common::DeliveryRecord;
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const TOTAL_LABEL: &str = "Total Geral";

fn hline(layer: &PdfLayerReference, layout: &PdfTableLayout, top_mm: f32) {
    let y = layout.to_pdf_y(top_mm);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(layout.margin_mm), Mm(y)), false),
            (Point::new(Mm(layout.page_width_mm - layout.margin_mm), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Writes one row of cells with the baseline a little above `bottom_mm`.
fn draw_cells<S: AsRef<str>>(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    layout: &PdfTableLayout,
    cells: &[S],
    bottom_mm: f32,
) {
    let y = layout.to_pdf_y(bottom_mm - layout.cell_padding_mm * 1.5);
    for (cell, x) in cells.iter().zip(layout.column_x_mm()) {
        layer.use_text(
            cell.as_ref(),
            layout.font_size_pt,
            Mm(x + layout.cell_padding_mm),
            Mm(y),
            font,
        );
    }
}

fn render(table: &PdfTable, layout: &PdfTableLayout, output_path: &Path) -> Result<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        &table.title,
        Mm(layout.page_width_mm),
        Mm(layout.page_height_mm),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| SheetError::PdfGeneration(format!("fonte: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SheetError::PdfGeneration(format!("fonte: {:?}", e)))?;

    let page_count = table.pages.len().max(table.footer_page + 1);
    let mut layers = vec![doc.get_page(page1).get_layer(layer1)];
    for _ in 1..page_count {
        let (page, layer) = doc.add_page(Mm(layout.page_width_mm), Mm(layout.page_height_mm), "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    layers[0].use_text(
        &table.title,
        layout.title_size_pt,
        Mm(layout.margin_mm),
        Mm(layout.to_pdf_y(layout.title_y_mm)),
        &bold,
    );

    for (index, rows) in table.pages.iter().enumerate() {
        let layer = &layers[index];
        let top = layout.table_top_mm(index);
        let header_bottom = top + layout.header_height_mm;

        hline(layer, layout, top);
        draw_cells(layer, &bold, layout, table.headers.as_slice(), header_bottom);
        hline(layer, layout, header_bottom);

        for (slot, cells) in rows.iter().enumerate() {
            let bottom = layout.row_top_mm(index, slot + 1);
            draw_cells(layer, &font, layout, cells.as_slice(), bottom);
            hline(layer, layout, bottom);
        }
    }

    let footer = format!("{}: {}", TOTAL_LABEL, table.grand_total);
    layers[table.footer_page].use_text(
        footer,
        layout.footer_size_pt,
        Mm(layout.margin_mm),
        Mm(layout.to_pdf_y(table.footer_top_mm)),
        &bold,
    );

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| SheetError::PdfGeneration(format!("falha ao salvar: {:?}", e)))?;

    Ok(())
}

/// A4 table of deliveries with the title on top and the grand total below.
///
/// The header row repeats on every page.
pub fn generate_pdf(rows: &[DeliveryRecord], output_path: &Path, title: &str) -> Result<()> {
    let layout = PdfTableLayout::default();
    let table = build_pdf_table(title, rows, &layout);
    render(&table, &layout, output_path)
}
