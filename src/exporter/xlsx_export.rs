use std::path::Path;

use anyhow::Context;
use log::info;
use rust_xlsxwriter::{Format, Workbook};

use crate::perk::{COLUMNS, PerkRecord};

const SHEET_NAME: &str = "Perks";

/// Same columns as the CSV, on a single worksheet with a bold header row.
pub fn write_xlsx(perks: &[PerkRecord], path: &Path) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }
    for (row, perk) in perks.iter().enumerate() {
        for (col, value) in perk.fields().iter().enumerate() {
            worksheet.write_string(row as u32 + 1, col as u16, *value)?;
        }
    }
    worksheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!("Data saved to {}", path.display());
    Ok(())
}
