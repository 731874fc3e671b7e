use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use console::style;

use crate::error::AppError;
use crate::models::listing::Listing;

const HEADERS: [&str; 3] = ["Title", "Salary", "Location"];
const SEP: char = ',';

/// Write the accumulated listings to `path` as CSV with a header row.
pub fn write_csv(path: &Path, listings: &[Listing]) -> Result<(), AppError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_listings(&mut out, listings)?;
    out.flush()?;
    tracing::info!("Wrote {} listings to {}", listings.len(), path.display());
    Ok(())
}

fn write_listings<W: Write>(mut w: W, listings: &[Listing]) -> io::Result<()> {
    write_row(&mut w, &HEADERS.map(String::from))?;
    for listing in listings {
        write_row(&mut w, &to_row(listing))?;
    }
    Ok(())
}

fn to_row(listing: &Listing) -> [String; 3] {
    [
        listing.title.clone(),
        listing.salary.map(format_salary).unwrap_or_default(),
        listing.location.clone(),
    ]
}

fn format_salary(salary: f64) -> String {
    if salary.fract() == 0.0 {
        format!("{salary:.0}")
    } else {
        format!("{salary:.2}")
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{SEP}")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Render listings as an aligned text table for the terminal.
pub fn render_table(listings: &[Listing]) -> String {
    let rows: Vec<[String; 3]> = listings
        .iter()
        .map(|l| {
            [
                l.title.clone(),
                l.salary.map(format_salary).unwrap_or_else(|| "-".to_string()),
                l.location.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let index_width = listings.len().max(1).to_string().len();
    let mut out = String::new();
    let header = format!(
        "{:index_width$}  {:<w0$}  {:>w1$}  {:<w2$}",
        "",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    out.push_str(&style(header.trim_end()).bold().to_string());
    out.push('\n');

    for (idx, row) in rows.iter().enumerate() {
        let line = format!(
            "{idx:index_width$}  {:<w0$}  {:>w1$}  {:<w2$}",
            row[0],
            row[1],
            row[2],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
