//! Reader and writer for the Esri ASCII grid format.
//!
//! Layout:
//!
//! ```text
//! ncols         4
//! nrows         3
//! xllcorner     0
//! yllcorner     0
//! cellsize      1
//! NODATA_value  -9999
//! 1 2 3 4
//! 5 6 7 8
//! 9 10 11 12
//! ```
//!
//! The six header fields must appear in this order, keys are matched
//! case-insensitively, and the first data line is the northernmost row.

use std::path::Path;

use tracing::debug;

use crate::error::{DemError, Result};
use crate::grid::Grid;
use crate::header::{OriginKind, RasterHeader};

const NCOLS: &[&str] = &["ncols"];
const NROWS: &[&str] = &["nrows"];
const X_ORIGIN: &[&str] = &["xllcorner", "xllcenter"];
const Y_ORIGIN: &[&str] = &["yllcorner", "yllcenter"];
const CELLSIZE: &[&str] = &["cellsize"];
const NODATA: &[&str] = &["nodata_value"];

/// Width of the key column when writing headers.
const KEY_WIDTH: usize = 14;

/// A header line split into its matched key and raw value.
struct HeaderField<'a> {
    line: usize,
    key: &'static str,
    key_index: usize,
    value: &'a str,
}

/// Parse an ASCII grid document into a [`Grid`].
pub fn parse(text: &str) -> Result<Grid> {
    // Line number reported when the input ends early.
    let eof_line = text.lines().count() + 1;

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let ncols_field = next_field(&mut lines, NCOLS, eof_line)?;
    let ncols = parse_count(&ncols_field)?;

    let nrows_field = next_field(&mut lines, NROWS, eof_line)?;
    let nrows = parse_count(&nrows_field)?;

    let x_field = next_field(&mut lines, X_ORIGIN, eof_line)?;
    let x_origin = parse_number(&x_field)?;

    let y_field = next_field(&mut lines, Y_ORIGIN, eof_line)?;
    let y_origin = parse_number(&y_field)?;
    if y_field.key_index != x_field.key_index {
        return Err(DemError::format(
            y_field.line,
            format!("'{}' cannot be combined with '{}'", y_field.key, x_field.key),
        ));
    }
    let origin_kind = if x_field.key_index == 0 {
        OriginKind::Corner
    } else {
        OriginKind::Center
    };

    let cellsize_field = next_field(&mut lines, CELLSIZE, eof_line)?;
    let cellsize = parse_number(&cellsize_field)?;
    if cellsize <= 0.0 {
        return Err(DemError::format(
            cellsize_field.line,
            format!("cellsize must be positive, got {}", cellsize),
        ));
    }

    let nodata_field = next_field(&mut lines, NODATA, eof_line)?;
    let nodata_value = parse_number(&nodata_field)?;

    let header = RasterHeader::new(
        ncols,
        nrows,
        x_origin,
        y_origin,
        origin_kind,
        cellsize,
        nodata_value,
    )
    .map_err(|e| DemError::format(nodata_field.line, e.to_string()))?;

    // Header counts are untrusted; grow as rows arrive.
    let mut data = Vec::new();
    let mut rows_read = 0;

    for (line, content) in lines {
        if rows_read == nrows {
            return Err(DemError::format(
                line,
                format!("unexpected data after the last of {} rows", nrows),
            ));
        }

        let row_start = data.len();
        for (col, token) in content.split_whitespace().enumerate() {
            if col >= ncols {
                return Err(DemError::format(
                    line,
                    format!("row {} has more than {} values", rows_read, ncols),
                ));
            }
            data.push(parse_sample(line, col, token)?);
        }

        let found = data.len() - row_start;
        if found != ncols {
            return Err(DemError::format(
                line,
                format!("row {} has {} values, expected {}", rows_read, found, ncols),
            ));
        }
        rows_read += 1;
    }

    if rows_read != nrows {
        return Err(DemError::format(
            eof_line,
            format!("expected {} data rows, found {}", nrows, rows_read),
        ));
    }

    debug!(ncols, nrows, cellsize, nodata_value, "Parsed ASCII grid");

    Grid::new(header, data)
}

/// Serialize a grid back into the ASCII grid format.
///
/// Values are written with Rust's shortest round-trip float formatting, so
/// `parse(&to_ascii(grid))` reproduces the grid exactly.
pub fn to_ascii(grid: &Grid) -> String {
    let header = grid.header();
    let mut out = String::with_capacity(grid.len() * 8 + 128);

    push_header_line(&mut out, "ncols", header.ncols().to_string());
    push_header_line(&mut out, "nrows", header.nrows().to_string());
    push_header_line(&mut out, header.origin_kind().x_key(), header.x_origin().to_string());
    push_header_line(&mut out, header.origin_kind().y_key(), header.y_origin().to_string());
    push_header_line(&mut out, "cellsize", header.cellsize().to_string());
    push_header_line(&mut out, "NODATA_value", header.nodata_value().to_string());

    for row in grid.data().chunks(header.ncols()) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    out
}

/// Write a grid to `path` in the ASCII grid format.
pub fn write_ascii(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path.as_ref(), to_ascii(grid))?;
    debug!(path = %path.as_ref().display(), "Wrote ASCII grid");
    Ok(())
}

fn push_header_line(out: &mut String, key: &str, value: String) {
    out.push_str(&format!("{:<width$}{}\n", key, value, width = KEY_WIDTH));
}

fn next_field<'a, I>(lines: &mut I, keys: &[&'static str], eof_line: usize) -> Result<HeaderField<'a>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (line, content) = lines.next().ok_or_else(|| {
        DemError::format(eof_line, format!("missing header field '{}'", keys[0]))
    })?;

    let mut tokens = content.split_whitespace();
    let found = tokens.next().unwrap_or_default();

    let key_index = keys
        .iter()
        .position(|key| found.eq_ignore_ascii_case(key))
        .ok_or_else(|| {
            DemError::format(
                line,
                format!("expected header field '{}', found '{}'", keys.join("' or '"), found),
            )
        })?;
    let key = keys[key_index];

    let value = tokens
        .next()
        .ok_or_else(|| DemError::format(line, format!("header field '{}' has no value", key)))?;

    if tokens.next().is_some() {
        return Err(DemError::format(
            line,
            format!("header field '{}' has more than one value", key),
        ));
    }

    Ok(HeaderField {
        line,
        key,
        key_index,
        value,
    })
}

fn parse_count(field: &HeaderField<'_>) -> Result<usize> {
    let count: usize = field.value.parse().map_err(|_| {
        DemError::format(
            field.line,
            format!("invalid value for {}: '{}' is not a whole number", field.key, field.value),
        )
    })?;
    if count == 0 {
        return Err(DemError::format(
            field.line,
            format!("{} must be positive", field.key),
        ));
    }
    Ok(count)
}

fn parse_number(field: &HeaderField<'_>) -> Result<f64> {
    match field.value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DemError::format(
            field.line,
            format!("invalid value for {}: '{}'", field.key, field.value),
        )),
    }
}

fn parse_sample(line: usize, col: usize, token: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DemError::format(
            line,
            format!("invalid sample '{}' in column {}", token, col),
        )),
    }
}
