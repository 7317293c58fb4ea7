use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};

use super::SheetLayout;
use crate::error::Result;

const SHEET_NAME: &str = "Sheet1";

/// Largest magnitude an Excel number (an `f64`) holds exactly.
const MAX_EXACT_NUMBER: u64 = 1 << 53;

/// Write a score as a number, or as text when a float would round it.
fn write_score(worksheet: &mut Worksheet, row: u32, col: u16, value: i64) -> Result<()> {
    if value.unsigned_abs() <= MAX_EXACT_NUMBER {
        worksheet.write_number(row, col, value as f64)?;
    } else {
        worksheet.write_string(row, col, value.to_string())?;
    }
    Ok(())
}

/// Build the workbook for a layout.
pub fn render_workbook(layout: &SheetLayout) -> Result<Workbook> {
    let banner = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let header = Format::new().set_bold().set_align(FormatAlign::Center);
    let footer = Format::new()
        .set_italic()
        .set_font_size(10)
        .set_font_color(Color::RGB(0x808080))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let last_col = layout.last_column();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    worksheet.merge_range(
        SheetLayout::TITLE_ROW,
        0,
        SheetLayout::TITLE_ROW,
        last_col,
        &layout.title,
        &banner,
    )?;

    for (col, name) in layout.header.iter().enumerate() {
        worksheet.write_string_with_format(SheetLayout::HEADER_ROW, col as u16, name, &header)?;
    }

    for (index, row) in layout.rows.iter().enumerate() {
        let row_num = layout.data_row(index);
        worksheet.write_string(row_num, 0, &row.id)?;
        worksheet.write_string(row_num, 1, &row.name)?;
        for (offset, &score) in row.scores.iter().enumerate() {
            write_score(worksheet, row_num, (offset + 2) as u16, score)?;
        }
        write_score(worksheet, row_num, last_col, row.total)?;
    }

    let footer_row = layout.footer_row();
    worksheet.merge_range(footer_row, 0, footer_row, last_col, &layout.footer, &footer)?;

    worksheet.set_column_width(1, 14)?;

    Ok(workbook)
}

/// Render a layout and save it to `path`.
pub fn write_workbook(layout: &SheetLayout, path: &Path) -> Result<()> {
    let mut workbook = render_workbook(layout)?;
    workbook.save(path)?;
    Ok(())
}
