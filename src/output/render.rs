use crate::model::{
    apperror::{ApplicationError, ErrorType},
    config::OutputFormat,
    models::ReportRow,
};

/**
 * Column headers of the report, in output order.
 */
const HEADERS: [&str; 5] = ["client_id", "date", "call", "sms", "internet"];

/**
 * Renders the report rows in the requested output format.
 *
 * # Arguments
 * `rows`: The aggregated report rows.
 * `format`: The output format to render in.
 *
 * # Returns
 * A Result containing the rendered report or an `ApplicationError`.
 */
pub fn render(rows: &[ReportRow], format: OutputFormat) -> Result<String, ApplicationError> {
    match format {
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Csv => Ok(render_csv(rows)),
        OutputFormat::Json => serde_json::to_string_pretty(rows).map_err(|err| ApplicationError::new(ErrorType::Rendering, format!("Failed to serialize report to JSON: {err}"))),
    }
}

/**
 * Renders a fixed-width text table with right-aligned columns.
 */
fn render_table(rows: &[ReportRow]) -> String {
    let cells: Vec<[String; 5]> = rows.iter().map(row_cells).collect();
    let mut widths: [usize; 5] = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(format_line(&HEADERS.map(String::from), &widths));
    for row in &cells {
        lines.push(format_line(row, &widths));
    }
    lines.join("\n")
}

/**
 * Renders a header line followed by one comma-separated line per row.
 */
fn render_csv(rows: &[ReportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADERS.join(","));
    for row in rows {
        lines.push(row_cells(row).join(","));
    }
    lines.join("\n")
}

fn row_cells(row: &ReportRow) -> [String; 5] {
    [row.client_id.to_string(), row.date.to_string(), row.call.to_string(), row.sms.to_string(), row.internet.to_string()]
}

fn format_line(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells.iter().zip(widths.iter().copied()).map(|(cell, width)| format!("{cell:>width$}")).collect::<Vec<String>>().join("  ")
}
