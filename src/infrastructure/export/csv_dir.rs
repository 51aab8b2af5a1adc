use super::workbook::Workbook;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write each sheet as `<dir>/<sheet>.csv`. Returns the files written.
pub fn write_csv_dir(workbook: &Workbook, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let mut written = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        let mut wtr = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to open {:?}", path))?;

        wtr.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            wtr.write_record(row.iter().map(|c| c.render()))?;
        }
        wtr.flush().context("Failed to flush CSV writer")?;
        written.push(path);
    }

    info!("Exported {} sheets to {:?}", written.len(), dir);
    Ok(written)
}
