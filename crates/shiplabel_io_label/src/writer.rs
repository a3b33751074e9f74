//! `.docx` writer for rendered shipping labels.

use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, Table, TableAlignmentType,
    TableCell, TableRow,
};

use crate::spec::{LabelWriteError, SpecLabelDocument, SpecLabelLayout};
use crate::util::derive_label_file_name;

/// Write `doc` as `shipping_label_<sanitized id>.docx` inside `dir_out`.
///
/// An existing file with the same name is overwritten. Returns the written path.
pub fn write_label_docx(
    doc: &SpecLabelDocument,
    dir_out: &Path,
    layout: &SpecLabelLayout,
) -> Result<PathBuf, LabelWriteError> {
    let path_file_label = dir_out.join(derive_label_file_name(&doc.order_id));
    let docx = build_label_docx(doc, layout);

    let file_label = File::create(&path_file_label).map_err(|source| LabelWriteError::Io {
        path: path_file_label.clone(),
        source,
    })?;
    docx.build()
        .pack(file_label)
        .map_err(|err| LabelWriteError::Build {
            path: path_file_label.clone(),
            message: err.to_string(),
        })?;

    Ok(path_file_label)
}

/// Assemble the label document: title, receiver/sender blocks, order number,
/// total items and the item table.
pub fn build_label_docx(doc: &SpecLabelDocument, layout: &SpecLabelLayout) -> Docx {
    let n_margin = layout.page_margin_twips;
    let margin = PageMargin::new()
        .top(n_margin)
        .bottom(n_margin)
        .left(n_margin)
        .right(n_margin);

    let paragraph_title = Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(
            Run::new()
                .add_text(&doc.title)
                .bold()
                .size(derive_half_points(layout.font_pt_title)),
        );

    let table_address = Table::new(vec![
        TableRow::new(vec![TableCell::new().add_paragraph(derive_block_paragraph(
            "TO:",
            &doc.receiver.to_lines(),
            layout.font_pt_receiver_header,
            layout.font_pt_receiver_body,
        ))]),
        TableRow::new(vec![TableCell::new().add_paragraph(derive_block_paragraph(
            "FROM:",
            &doc.sender_lines,
            layout.font_pt_sender_header,
            layout.font_pt_sender_body,
        ))]),
    ])
    .align(TableAlignmentType::Center);

    let table_order = Table::new(vec![TableRow::new(vec![derive_text_cell(
        &format!("Order Number: {}", doc.order_id),
        true,
    )])])
    .align(TableAlignmentType::Center);

    let table_total = Table::new(vec![TableRow::new(vec![
        derive_text_cell("Total Items", false),
        derive_text_cell(&doc.total_items.to_string(), false),
    ])])
    .align(TableAlignmentType::Center);

    let mut l_item_rows = vec![TableRow::new(vec![
        derive_text_cell("Item Name", true),
        derive_text_cell("Quantity", true),
    ])];
    for item in &doc.items {
        l_item_rows.push(TableRow::new(vec![
            derive_text_cell(&item.name, false),
            derive_text_cell(&item.quantity.to_string(), false),
        ]));
    }
    let table_items = Table::new(l_item_rows).align(TableAlignmentType::Center);

    Docx::new()
        .page_margin(margin)
        .add_paragraph(paragraph_title)
        .add_paragraph(Paragraph::new())
        .add_table(table_address)
        .add_table(table_order)
        .add_table(table_total)
        .add_table(table_items)
}

/// Bold header line followed by body lines in one left-aligned paragraph.
fn derive_block_paragraph(
    header: &str,
    lines: &[String],
    font_pt_header: usize,
    font_pt_body: usize,
) -> Paragraph {
    let run_header = Run::new()
        .add_text(header)
        .bold()
        .size(derive_half_points(font_pt_header))
        .add_break(BreakType::TextWrapping);

    let mut run_body = Run::new().size(derive_half_points(font_pt_body));
    for (n_idx, line) in lines.iter().enumerate() {
        if n_idx > 0 {
            run_body = run_body.add_break(BreakType::TextWrapping);
        }
        run_body = run_body.add_text(line);
    }

    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(run_header)
        .add_run(run_body)
}

fn derive_text_cell(text: &str, if_bold: bool) -> TableCell {
    let mut run = Run::new().add_text(text);
    if if_bold {
        run = run.bold();
    }
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

/// docx font sizes are expressed in half-points.
fn derive_half_points(font_pt: usize) -> usize {
    font_pt * 2
}
