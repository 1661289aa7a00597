//! Pipe-table formatting.
//!
//! Columns are padded to their widest line. A column whose non-empty data
//! values all parse as numbers is right-aligned, everything else is
//! left-aligned. Header text containing newlines occupies several physical
//! header lines.

use super::grid::TableView;

/// Extra width reserved next to each header.
const MIN_PADDING: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

fn is_number(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

fn column_align(rows: &[Vec<String>], col: usize) -> Align {
    let mut values = rows
        .iter()
        .map(|r| r[col].as_str())
        .filter(|v| !v.is_empty())
        .peekable();
    if values.peek().is_some() && values.all(is_number) {
        Align::Right
    } else {
        Align::Left
    }
}

fn escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, w: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{s:<w$}"),
        Align::Right => format!("{s:>w$}"),
    }
}

fn format_line(cells: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let mut line = String::from("|");
    for ((cell, &w), &align) in cells.iter().zip(widths).zip(aligns) {
        line.push(' ');
        line.push_str(&pad(cell, w, align));
        line.push_str(" |");
    }
    line
}

fn separator(widths: &[usize], aligns: &[Align]) -> String {
    let mut line = String::from("|");
    for (&w, &align) in widths.iter().zip(aligns) {
        let dashes = "-".repeat(w + 1);
        match align {
            Align::Left => {
                line.push(':');
                line.push_str(&dashes);
            }
            Align::Right => {
                line.push_str(&dashes);
                line.push(':');
            }
        }
        line.push('|');
    }
    line
}

/// Renders a table view as a Markdown pipe table.
///
/// A view without columns renders as the empty string.
pub fn render(view: &TableView) -> String {
    let n_cols = view.headers.len();
    if n_cols == 0 {
        return String::new();
    }

    let header_lines: Vec<Vec<String>> = view
        .headers
        .iter()
        .map(|h| h.split('\n').map(escape).collect())
        .collect();
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|r| r.iter().map(|v| escape(v)).collect())
        .collect();

    let aligns: Vec<Align> = (0..n_cols).map(|c| column_align(&rows, c)).collect();
    let widths: Vec<usize> = (0..n_cols)
        .map(|c| {
            let header_w = header_lines[c].iter().map(|l| width(l)).max().unwrap_or(0);
            rows.iter()
                .map(|r| width(&r[c]))
                .fold(header_w + MIN_PADDING, usize::max)
        })
        .collect();

    let height = header_lines.iter().map(Vec::len).max().unwrap_or(1);
    let mut out: Vec<String> = (0..height)
        .map(|i| {
            let cells: Vec<String> = header_lines
                .iter()
                .map(|lines| lines.get(i).cloned().unwrap_or_default())
                .collect();
            format_line(&cells, &widths, &aligns)
        })
        .collect();
    out.push(separator(&widths, &aligns));
    out.extend(rows.iter().map(|r| format_line(r, &widths, &aligns)));

    out.join("\n")
}
