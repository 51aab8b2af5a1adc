use super::workbook::{Cell, Workbook};
use anyhow::{Context, Result};
use rust_xlsxwriter::Format;
use std::borrow::Cow;
use std::path::Path;
use tracing::{info, warn};

/// Longest text Excel accepts in a single cell, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

fn fit_cell_text(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => Cow::Owned(text[..cut].to_string()),
        None => Cow::Borrowed(text),
    }
}

/// Write the workbook as a single `.xlsx` file, one worksheet per sheet.
pub fn write_xlsx(workbook: &Workbook, path: &Path) -> Result<()> {
    let mut xlsx = rust_xlsxwriter::Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .with_context(|| format!("Invalid sheet name {}", sheet.name))?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let row_idx = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(s) => {
                        let text = fit_cell_text(s);
                        if let Cow::Owned(_) = text {
                            warn!(
                                "Truncated {} cell at row {} to {} characters",
                                sheet.name, row_idx, MAX_CELL_CHARS
                            );
                        }
                        worksheet.write_string(row_idx, col, text.as_ref())?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_idx, col, *n)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    xlsx.save(path)
        .with_context(|| format!("Failed to write workbook to {:?}", path))?;
    info!("Exported workbook to {:?}", path);
    Ok(())
}
