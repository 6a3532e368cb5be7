use std::fmt::Write as _;
use std::time::Duration;

use crate::error::{AppError, AppResult, SinkError};

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line).map_err(|err| AppError::sink(SinkError::WriteLine { source: err }))
}

/// Seconds with millisecond precision, rounded half up: `0.100s`.
pub(super) fn format_secs(duration: Duration) -> String {
    let millis = duration
        .as_nanos()
        .saturating_add(500_000)
        .checked_div(1_000_000)
        .unwrap_or(0);
    let secs = millis.checked_div(1000).unwrap_or(0);
    let fraction = millis.checked_rem(1000).unwrap_or(0);
    format!("{}.{:03}s", secs, fraction)
}

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width.saturating_add(2)));
        line.push('+');
    }
    line
}

fn row_line(widths: &[usize], cells: &[String]) -> String {
    let mut line = String::from("|");
    for (width, cell) in widths.iter().zip(cells) {
        let padding = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', padding.saturating_add(1)));
        line.push('|');
    }
    line
}

/// Renders a grid table with a `=` rule under the header and `-` rules
/// between rows.
pub(super) fn write_grid(output: &mut String, headers: &[&str], rows: &[Vec<String>]) -> AppResult<()> {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|header| (*header).to_owned()).collect();
    write_line(output, &border(&widths, '-'))?;
    write_line(output, &row_line(&widths, &header_cells))?;
    write_line(output, &border(&widths, '='))?;
    for row in rows {
        write_line(output, &row_line(&widths, row))?;
        write_line(output, &border(&widths, '-'))?;
    }
    Ok(())
}
